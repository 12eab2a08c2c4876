//! Structural subtype predicates.

use serde_json::{Map, Value};

use crate::error::json_kind;
use crate::record::{Record, lookup, same_value};
use crate::ConfigableError;

/// A flat mapping of keys to scalar values that a record must contain for
/// the owning type to be selected.
///
/// An empty predicate matches every record and acts as a catch-all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtypePredicate {
    entries: Map<String, Value>,
}

impl SubtypePredicate {
    /// Validate `value` as the predicate of `type_name`.
    pub(crate) fn parse(type_name: &str, value: Value) -> Result<Self, ConfigableError> {
        let malformed = |reason: String| ConfigableError::MalformedSubtypePredicate {
            type_name: type_name.to_owned(),
            reason,
        };
        let found = json_kind(&value);
        let Value::Object(entries) = value else {
            return Err(malformed(format!("expected an object, found {found}")));
        };
        if let Some((key, nested)) = entries.iter().find(|(_, v)| !is_scalar(v)) {
            return Err(malformed(format!(
                "key '{key}' maps to {}, expected a string, number or boolean",
                json_kind(nested)
            )));
        }
        Ok(Self { entries })
    }

    /// Whether `record` carries every key of the predicate with an equal
    /// value. Numbers compare by magnitude, so `8` matches `8.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use configable::{Registry, TypeSpec, record};
    /// use serde_json::json;
    ///
    /// let mut registry = Registry::new();
    /// let dog = registry.define(TypeSpec::new("Dog")).expect("define");
    /// let husky = registry
    ///     .extend(dog, TypeSpec::new("Husky").subtype(json!({"breed": "husky"})))
    ///     .expect("extend");
    /// let predicate = registry
    ///     .get(husky)
    ///     .and_then(|decl| decl.subtype())
    ///     .expect("predicate");
    ///
    /// let sparky = record::from_value(json!({"breed": "husky", "size": "large"})).expect("record");
    /// let gracie = record::from_value(json!({"breed": "retriever"})).expect("record");
    /// assert!(predicate.matches(&sparky));
    /// assert!(!predicate.matches(&gracie));
    /// ```
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.entries
            .iter()
            .all(|(key, expected)| {
                lookup(record, key).is_some_and(|found| same_value(found, expected))
            })
    }

    /// Whether the predicate has no keys.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.entries.is_empty()
    }

    /// The key/value pairs the predicate requires.
    #[must_use]
    pub const fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }
}

const fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn record(value: Value) -> Record {
        crate::record::from_value(value).expect("object record")
    }

    #[rstest]
    #[case(json!("husky"))]
    #[case(json!(["breed", "husky"]))]
    #[case(json!({"breed": {"name": "husky"}}))]
    #[case(json!({"breed": ["husky"]}))]
    #[case(json!({"breed": null}))]
    fn rejects_non_flat_predicates(#[case] value: Value) {
        let err = SubtypePredicate::parse("Husky", value).expect_err("malformed predicate");
        assert!(matches!(
            err,
            ConfigableError::MalformedSubtypePredicate { ref type_name, .. } if type_name == "Husky"
        ));
    }

    #[rstest]
    #[case(json!({"species": "dog", "breed": "husky"}), true)]
    #[case(json!({"species": "dog"}), false)]
    #[case(json!({"species": "dog", "breed": "retriever"}), false)]
    #[case(json!({"species": "dog", "breed": null}), false)]
    fn every_key_must_match(#[case] input: Value, #[case] expected: bool) {
        let predicate =
            SubtypePredicate::parse("Husky", json!({"species": "dog", "breed": "husky"}))
                .expect("valid predicate");
        assert_eq!(predicate.matches(&record(input)), expected);
    }

    #[test]
    fn empty_predicate_matches_everything() {
        let predicate = SubtypePredicate::parse("Any", json!({})).expect("valid predicate");
        assert!(predicate.is_catch_all());
        assert!(predicate.matches(&record(json!({}))));
        assert!(predicate.matches(&record(json!({"x": 1}))));
    }

    #[test]
    fn equality_is_type_sensitive() {
        let predicate = SubtypePredicate::parse("One", json!({"n": 1})).expect("valid predicate");
        assert!(predicate.matches(&record(json!({"n": 1}))));
        assert!(!predicate.matches(&record(json!({"n": "1"}))));
    }

    #[rstest]
    #[case(json!({"cylinders": 8.0}), true)]
    #[case(json!({"cylinders": 8}), true)]
    #[case(json!({"cylinders": 8.5}), false)]
    fn float_records_match_integer_predicates(#[case] input: Value, #[case] expected: bool) {
        let predicate =
            SubtypePredicate::parse("V8", json!({"cylinders": 8})).expect("valid predicate");
        assert_eq!(predicate.matches(&record(input)), expected);
    }
}

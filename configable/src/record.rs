//! Configuration records handed to the construction engine.
//!
//! A record is a flat JSON object. Absent keys and keys mapped to `null`
//! are both treated as missing, so a record produced by a format without a
//! null literal behaves the same as one that spells the null out.

use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::{Map, Number, Value};

use crate::error::json_kind;
use crate::{ConfigableError, ConfigableResult};

/// Raw configuration record consumed by [`crate::Registry::construct`].
pub type Record = Map<String, Value>;

/// Look up `key`, returning `None` for absent keys and explicit nulls.
///
/// # Examples
///
/// ```
/// use configable::record::lookup;
/// use serde_json::json;
///
/// let record = json!({"a": 1, "b": null}).as_object().cloned().unwrap_or_default();
/// assert_eq!(lookup(&record, "a"), Some(&json!(1)));
/// assert_eq!(lookup(&record, "b"), None);
/// assert_eq!(lookup(&record, "c"), None);
/// ```
#[must_use]
pub fn lookup<'a>(record: &'a Record, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|value| !value.is_null())
}

/// Compare two JSON values, treating numbers as equal when they have the
/// same magnitude.
///
/// Formats disagree on whether `8` is written as an integer or a float, so
/// predicate matching and choice checks go through this rather than
/// [`Value`]'s own equality. Arrays and objects compare element-wise.
pub(crate) fn same_value(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => same_number(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_value(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| same_value(x, y)))
        }
        _ => left == right,
    }
}

fn same_number(left: &Number, right: &Number) -> bool {
    if left.is_f64() || right.is_f64() {
        return left.as_f64().partial_cmp(&right.as_f64()) == Some(Ordering::Equal);
    }
    match (left.as_i64(), right.as_i64()) {
        (Some(a), Some(b)) => a == b,
        _ => left.as_u64().is_some() && left.as_u64() == right.as_u64(),
    }
}

/// Convert a JSON value into a [`Record`].
///
/// # Errors
///
/// Returns [`ConfigableError::RecordShape`] when `value` is not an object.
///
/// # Examples
///
/// ```
/// use configable::record::from_value;
/// use serde_json::json;
///
/// let record = from_value(json!({"species": "felis catus"})).expect("object record");
/// assert_eq!(record.len(), 1);
/// assert!(from_value(json!([1, 2])).is_err());
/// ```
pub fn from_value(value: Value) -> ConfigableResult<Record> {
    into_record(value, "record")
}

pub(crate) fn into_record(value: Value, type_name: &str) -> ConfigableResult<Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Arc::new(ConfigableError::RecordShape {
            type_name: type_name.to_owned(),
            found: json_kind(&other),
        })),
    }
}

/// Extract a [`Record`] from a caller-assembled [`figment::Figment`].
///
/// The figment is only asked to extract its merged value; any file or
/// environment access is performed by the providers the caller attached.
///
/// # Errors
///
/// Returns [`ConfigableError::Gathering`] when extraction fails and
/// [`ConfigableError::RecordShape`] when the merged value is not an object.
///
/// # Examples
///
/// ```
/// use configable::record::from_figment;
/// use figment::{Figment, providers::Serialized};
/// use serde_json::json;
///
/// let figment = Figment::from(Serialized::defaults(json!({"units": "metric"})));
/// let record = from_figment(&figment).expect("figment record");
/// assert_eq!(record.get("units"), Some(&json!("metric")));
/// ```
#[cfg(feature = "figment")]
pub fn from_figment(figment: &figment::Figment) -> ConfigableResult<Record> {
    use crate::ConfigableResultExt;

    let value: Value = figment.extract().into_configable()?;
    from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("text"), "string")]
    #[case(json!(3), "number")]
    #[case(json!([{"a": 1}]), "array")]
    #[case(json!(null), "null")]
    fn rejects_non_object_records(#[case] value: Value, #[case] expected: &str) {
        let err = from_value(value).expect_err("non-object record must fail");
        assert!(
            matches!(&*err, ConfigableError::RecordShape { found, .. } if *found == expected),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn null_entries_are_missing() {
        let record = from_value(json!({"present": false, "absent": null})).expect("record");
        assert_eq!(lookup(&record, "present"), Some(&json!(false)));
        assert!(lookup(&record, "absent").is_none());
    }

    #[rstest]
    #[case(json!(8), json!(8.0), true)]
    #[case(json!(8.0), json!(8), true)]
    #[case(json!(-3), json!(-3.0), true)]
    #[case(json!(u64::MAX), json!(u64::MAX), true)]
    #[case(json!(8), json!(8.5), false)]
    #[case(json!(-1), json!(u64::MAX), false)]
    #[case(json!(8), json!("8"), false)]
    #[case(json!([1, {"n": 2}]), json!([1.0, {"n": 2.0}]), true)]
    #[case(json!({"n": 2}), json!({"n": 2, "m": 3}), false)]
    fn numbers_compare_by_magnitude(
        #[case] left: Value,
        #[case] right: Value,
        #[case] expected: bool,
    ) {
        assert_eq!(same_value(&left, &right), expected);
    }
}

//! Ready-made [`Kind::Cast`](super::Kind::Cast) conversions for common scalar
//! targets.

use serde_json::{Number, Value};

use super::Kind;
use crate::error::{BoxError, json_kind};

/// Coerce a value to a boolean using truthiness.
///
/// `false`, `0`, `""`, `[]`, `{}` and `null` become `false`; everything
/// else becomes `true`.
///
/// # Examples
///
/// ```
/// use configable::{Setting, casts};
///
/// let flag = Setting::new().kind(casts::truthy());
/// assert!(flag.declared_kind().is_some());
/// ```
#[must_use]
pub fn truthy() -> Kind {
    Kind::cast(|value| Ok(Value::Bool(is_truthy(&value))))
}

/// Coerce numbers and numeric strings to an integer.
#[must_use]
pub fn integer() -> Kind {
    Kind::cast(to_integer)
}

/// Render scalars as strings; strings pass through unchanged.
#[must_use]
pub fn text() -> Kind {
    Kind::cast(|value| match value {
        Value::String(_) => Ok(value),
        Value::Bool(_) | Value::Number(_) => Ok(Value::String(value.to_string())),
        other => Err(format!("cannot render {} as text", json_kind(&other)).into()),
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn to_integer(value: Value) -> Result<Value, BoxError> {
    if value.is_i64() || value.is_u64() {
        return Ok(value);
    }
    match &value {
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map(|n| Value::Number(Number::from(n)))
            .map_err(|err| format!("invalid integer {text:?}: {err}").into()),
        other => Err(format!("cannot convert {} to an integer", json_kind(other)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(1), true)]
    #[case(json!(0), false)]
    #[case(json!(""), false)]
    #[case(json!("no"), true)]
    #[case(json!([]), false)]
    #[case(json!({"a": 1}), true)]
    fn truthiness_follows_emptiness(#[case] input: Value, #[case] expected: bool) {
        assert_eq!(is_truthy(&input), expected);
    }

    #[rstest]
    #[case(json!(42), json!(42))]
    #[case(json!(" 7 "), json!(7))]
    fn integers_accept_numbers_and_numeric_text(#[case] input: Value, #[case] expected: Value) {
        let converted = to_integer(input).expect("integer conversion");
        assert_eq!(converted, expected);
    }

    #[rstest]
    #[case(json!("seven"))]
    #[case(json!(1.5))]
    #[case(json!(true))]
    fn integers_reject_other_values(#[case] input: Value) {
        assert!(to_integer(input).is_err());
    }
}

//! Lenient boolean coercion for editorial flags
//!
//! The content API is not strict about flag types: a flag may be missing,
//! `null`, a number, a string or a real boolean. Everything is folded into a
//! strict `bool` using JavaScript truthiness.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// JavaScript `!!value` semantics for a JSON value
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Deserialize any JSON value into a strict boolean flag
///
/// Pair with `#[serde(default)]` so a missing field becomes `false`.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(truthy(&value))
}

/// Deserialize a list that may be `null` into an empty list
pub fn deserialize_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a value that may be `null` into its default
pub fn deserialize_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!truthy(&value), "{} should be falsy", value);
        }
    }

    #[test]
    fn test_truthy_values() {
        for value in [
            json!(true),
            json!(1),
            json!(-3),
            json!(0.5),
            json!("false"),
            json!("0"),
            json!([]),
            json!({}),
        ] {
            assert!(truthy(&value), "{} should be truthy", value);
        }
    }
}

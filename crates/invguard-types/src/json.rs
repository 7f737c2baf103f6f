//! Conversion from `serde_json` values.
//!
//! Handy for building trees with `serde_json::json!`. Note that without the
//! `preserve_order` feature `serde_json` objects iterate in key order, so
//! trees built this way visit sibling groups alphabetically.

use crate::mapping::Mapping;
use crate::value::Value;

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::Integer(i),
                (None, Some(u)) => Value::Unsigned(u),
                _ => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Mapping>(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_nested_json() {
        let v = Value::from(json!({
            "all": {"vars": {"port": 8080, "ratio": 0.5, "debug": false, "tags": ["a", null]}}
        }));
        let vars = v
            .as_mapping()
            .and_then(|m| m.get("all"))
            .and_then(Value::as_mapping)
            .and_then(|m| m.get("vars"))
            .and_then(Value::as_mapping)
            .expect("vars mapping");
        assert_eq!(vars.get("port"), Some(&Value::Integer(8080)));
        assert_eq!(vars.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(vars.get("debug"), Some(&Value::Bool(false)));
        assert_eq!(
            vars.get("tags"),
            Some(&Value::Sequence(vec![Value::from("a"), Value::Null]))
        );
    }

    #[test]
    fn large_unsigned_stays_exact() {
        assert_eq!(Value::from(json!(u64::MAX)), Value::Unsigned(u64::MAX));
        assert_eq!(Value::from(json!(42u64)), Value::Integer(42));
        assert!(matches!(Value::from(json!(1e300)), Value::Float(_)));
    }
}

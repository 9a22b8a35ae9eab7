//! Structural equality and field-level differences over JSON-shaped values.
//!
//! Inputs are finite trees. Every value handed to these functions comes from
//! serde data (see [`crate::model::TopologySnapshot`]), which cannot contain
//! cycles, so no cycle guard is needed.

use serde_json::Value;

/// Structural equality.
///
/// Scalars compare by value (numbers numerically, so `48` equals `48.0`).
/// Objects are equal when their key sets match and every value is
/// recursively equal. Arrays are equal when they have the same length and
/// equal elements position by position. Values of different types are never
/// equal.
#[must_use]
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            x == y || matches!((x.as_f64(), y.as_f64()), (Some(fx), Some(fy)) if fx == fy)
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(key, x)| ym.get(key).is_some_and(|y| deep_equal(x, y)))
        }
        _ => false,
    }
}

/// Field-level differences from `a` to `b`.
///
/// Walks the union of keys (keys of `a` first, then keys only in `b`) and
/// emits `"removed <key>"`, `"added <key>"` or `"<key> changed"`. Array
/// positions count as keys. Scalars have no keys and yield nothing.
#[must_use]
pub fn field_differences(a: &Value, b: &Value) -> Vec<String> {
    let a_keys = keys_of(a);
    let b_keys = keys_of(b);

    let mut differences = Vec::new();
    for key in &a_keys {
        match (field(a, key), field(b, key)) {
            (Some(_), None) => differences.push(format!("removed {key}")),
            (Some(x), Some(y)) if !deep_equal(x, y) => {
                differences.push(format!("{key} changed"));
            }
            _ => {}
        }
    }
    for key in b_keys.iter().filter(|k| !a_keys.contains(k)) {
        differences.push(format!("added {key}"));
    }
    differences
}

fn keys_of(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
        _ => Vec::new(),
    }
}

fn field<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_equal_scalars() {
        assert!(deep_equal(&json!("a"), &json!("a")));
        assert!(deep_equal(&json!(48), &json!(48.0)));
        assert!(!deep_equal(&json!(48), &json!("48")));
        assert!(!deep_equal(&json!(null), &json!(false)));
    }

    #[test]
    fn test_deep_equal_ignores_key_order() {
        let a = json!({"id": "leaf-1", "model": "DS2000"});
        let b = json!({"model": "DS2000", "id": "leaf-1"});
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn test_deep_equal_nested_and_key_sets() {
        let a = json!({"id": "x", "tags": {"rack": "r1"}});
        let b = json!({"id": "x", "tags": {"rack": "r2"}});
        assert!(!deep_equal(&a, &b));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!deep_equal(&json!([1, 2]), &json!([1, 2, 3])));
        assert!(!deep_equal(&json!([]), &json!({})));
    }

    #[test]
    fn test_field_differences_union_order() {
        let a = json!({"id": "leaf-1", "model": "DS2000", "rack": "r1"});
        let b = json!({"id": "leaf-1", "model": "DS2000-V2", "ports": 48});
        assert_eq!(
            field_differences(&a, &b),
            vec!["model changed", "removed rack", "added ports"]
        );
    }

    #[test]
    fn test_field_differences_identical_is_empty() {
        let a = json!({"id": "leaf-1", "ports": 48});
        assert!(field_differences(&a, &a.clone()).is_empty());
        assert!(field_differences(&json!(1), &json!(2)).is_empty());
    }

    #[test]
    fn test_field_differences_arrays_by_position() {
        let a = json!(["x", "y"]);
        let b = json!(["x", "z", "w"]);
        assert_eq!(field_differences(&a, &b), vec!["1 changed", "added 2"]);
    }
}

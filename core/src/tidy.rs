//! # Tidying
//!
//! Strips placeholder emptiness from a JSON document before it is written.
//!
//! `null`, `""`, `[]` and `{}` count as empty. `false`, `0` and every other
//! concrete scalar are values and are kept. Objects are tidied depth-first, so
//! an object whose members were all empty is itself removed from its parent.
//! Array elements are left alone; only an empty array is dropped.

use serde_json::Value;

/// Returns `value` with every empty member removed, recursively.
///
/// The root itself is never removed: a root object whose members were all
/// empty comes back as `{}`.
pub fn tidy(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, child)| (key, tidy(child)))
                .filter(|(_, child)| !is_empty(child))
                .collect(),
        ),
        other => other,
    }
}

/// True for the values [`tidy`] prunes.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tidy_descriptor() {
        let descriptor = json!({"method": "GET", "url": "/x", "params": {}, "accepts": []});
        assert_eq!(tidy(descriptor), json!({"method": "GET", "url": "/x"}));
    }

    #[test]
    fn test_tidy_keeps_false_and_zero() {
        let value = json!({"required": false, "min": 0, "type": "", "enum": null});
        assert_eq!(tidy(value), json!({"required": false, "min": 0}));
    }

    #[test]
    fn test_tidy_prunes_emptied_parents() {
        let value = json!({
            "users": {
                "unbound": {"method": "", "url": "", "params": {}},
                "get": {"method": "GET", "url": "/u", "params": {"id": {"type": "any", "in": null}}}
            },
            "ghost": {"gone": {"method": "", "url": ""}}
        });
        assert_eq!(
            tidy(value),
            json!({"users": {"get": {"method": "GET", "url": "/u", "params": {"id": {"type": "any"}}}}})
        );
    }

    #[test]
    fn test_tidy_leaves_array_members_alone() {
        let value = json!({"enum": ["", null, "a"]});
        assert_eq!(tidy(value.clone()), value);
    }

    #[test]
    fn test_tidy_root_survives() {
        assert_eq!(tidy(json!({"a": {}})), json!({}));
        assert_eq!(tidy(json!(null)), json!(null));
    }
}

//! Field-name translation between the snake_case wire format and camelCase models.
//!
//! Only object keys are rewritten. Strings, numbers, booleans and null pass through
//! untouched, so date strings and other opaque text are never altered.

use serde_json::{Map, Value};

/// `memory_gb` -> `memoryGb`. Only a lowercase ASCII letter after `_` is lifted.
pub fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('_', Some(next)) if next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// `memoryGb` -> `memory_gb`.
pub fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Recursively rename object keys to camelCase.
pub fn keys_to_camel(value: Value) -> Value {
    rename_keys(value, &snake_to_camel)
}

/// Recursively rename object keys to snake_case.
pub fn keys_to_snake(value: Value) -> Value {
    rename_keys(value, &camel_to_snake)
}

fn rename_keys(value: Value, rename: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (rename(&k), rename_keys(v, rename)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| rename_keys(v, rename)).collect())
        }
        terminal => terminal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Every multi-word field name of the data model.
    const MODEL_FIELDS: &[(&str, &str)] = &[
        ("created_at", "createdAt"),
        ("updated_at", "updatedAt"),
        ("datacenter_id", "datacenterId"),
        ("serial_number", "serialNumber"),
        ("server_id", "serverId"),
        ("os_id", "osId"),
        ("memory_gb", "memoryGb"),
        ("host_id", "hostId"),
        ("eol_date", "eolDate"),
        ("person_id", "personId"),
        ("entity_type", "entityType"),
        ("entity_id", "entityId"),
    ];

    #[test]
    fn test_model_field_names_translate_both_ways() {
        for (snake, camel) in MODEL_FIELDS {
            assert_eq!(snake_to_camel(snake), *camel);
            assert_eq!(camel_to_snake(camel), *snake);
        }
        assert_eq!(snake_to_camel("hostname"), "hostname");
        assert_eq!(camel_to_snake("hostname"), "hostname");
    }

    #[test]
    fn test_nested_keys_and_arrays() {
        let wire = json!([
            {"host_id": "h-1", "meta": {"created_at": "2024-01-01T00:00:00"}, "tags": [{"tag_name": "x"}]}
        ]);
        let camel = keys_to_camel(wire.clone());
        assert_eq!(
            camel,
            json!([
                {"hostId": "h-1", "meta": {"createdAt": "2024-01-01T00:00:00"}, "tags": [{"tagName": "x"}]}
            ])
        );
        assert_eq!(keys_to_snake(camel), wire);
    }

    #[test]
    fn test_values_are_not_rewritten() {
        let wire = json!({"status": "bare_metal_pending", "cpu": 4, "active": true, "os_id": null});
        let camel = keys_to_camel(wire);
        assert_eq!(camel["status"], "bare_metal_pending");
        assert_eq!(camel["cpu"], 4);
        assert_eq!(camel["active"], true);
        assert!(camel["osId"].is_null());
    }

    #[test]
    fn test_kebab_values_survive_snake_translation() {
        let body = keys_to_snake(json!({"type": "bare-metal", "serverId": "srv-1"}));
        assert_eq!(body, json!({"type": "bare-metal", "server_id": "srv-1"}));
    }
}

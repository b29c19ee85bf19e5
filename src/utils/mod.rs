//! Utility functions shared across the application.

use serde_json::Value;

/// Keys whose values never reach the logs.
const SANITIZED_KEYS: [&str; 2] = ["access_token", "refresh_token"];

const SANITIZED_PLACEHOLDER: &str = "<sanitized from logging>";

/// Returns a copy of `value` that is safe to log.
///
/// Values stored under `access_token` or `refresh_token` keys are replaced,
/// at any depth.
///
/// # Arguments
///
/// * `value` - The JSON value to sanitize, typically a whole Lambda event
#[must_use]
pub fn sanitize_for_logging(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, entry)| {
                    let sanitized = if SANITIZED_KEYS.contains(&key.as_str()) {
                        Value::String(SANITIZED_PLACEHOLDER.to_string())
                    } else {
                        sanitize_for_logging(entry)
                    };
                    (key.clone(), sanitized)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_for_logging).collect()),
        other => other.clone(),
    }
}

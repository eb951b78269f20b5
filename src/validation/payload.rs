use serde_json::{Map, Value};

use crate::error::ApiError;

/// Untyped JSON request body
pub type RawPayload = Map<String, Value>;

pub const JSON_ONLY: &str = "This resource only expects JSON content requests";
pub const UTF8_JSON_ONLY: &str = "Resource must be in UTF-8 JSON format";

/// Decode a body as a JSON object. Anything else (bad JSON, arrays, scalars)
/// is rejected with `message`.
pub fn parse_json_object(body: &[u8], message: &str) -> Result<RawPayload, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => {
            tracing::debug!("Rejected non-object JSON payload: {}", other);
            Err(ApiError::malformed_payload(message))
        }
        Err(e) => {
            tracing::debug!("Rejected malformed JSON payload: {}", e);
            Err(ApiError::malformed_payload(message))
        }
    }
}

/// Like `parse_json_object`, but checks UTF-8 first so the two failures can
/// be told apart in logs.
pub fn parse_utf8_json_object(body: &[u8], message: &str) -> Result<RawPayload, ApiError> {
    let text = std::str::from_utf8(body).map_err(|e| {
        tracing::debug!("Rejected non UTF-8 payload: {}", e);
        ApiError::malformed_payload(message)
    })?;
    parse_json_object(text.as_bytes(), message)
}

/// String form of a scalar JSON value. Compound values and `null` have none.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn missing_field_message(key: &str) -> String {
    format!("Request must include json request containing {}", key)
}

pub fn unconvertible_field_message(key: &str) -> String {
    format!("Request must include string convertible JSON field {}", key)
}

/// Presence then string-convertibility, key by key in manifest order.
/// The first failing key short-circuits.
pub fn extract_fields<const N: usize>(payload: &RawPayload, keys: [&str; N]) -> Result<[String; N], ApiError> {
    let mut fields: [String; N] = std::array::from_fn(|_| String::new());

    for (slot, key) in fields.iter_mut().zip(keys) {
        let value = payload
            .get(key)
            .ok_or_else(|| ApiError::validation(key, missing_field_message(key)))?;
        *slot = scalar_to_string(value).ok_or_else(|| ApiError::validation(key, unconvertible_field_message(key)))?;
    }

    Ok(fields)
}

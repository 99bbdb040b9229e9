//! Encoding rules for calls and replies.
//!
//! Callers build their params and headers for a browser-side client, so values are
//! stringified and escaped the way JavaScript's `String()` and `encodeURIComponent()`
//! would.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

use super::types::{CallSpec, ReplyEnvelope};
use crate::error::Result;

/// Characters `encodeURIComponent` leaves untouched
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Decode a `dequeue_request` body into a call.
///
/// The server pads messages with trailing whitespace, which is ignored.
pub fn decode_call_spec(body: &str) -> Result<CallSpec> {
    Ok(serde_json::from_str(body.trim())?)
}

/// Encode a reply for `queue_reply`
pub fn encode_reply(envelope: &ReplyEnvelope) -> Result<String> {
    Ok(serde_json::to_string(envelope)?)
}

/// Percent-encode a query value like `encodeURIComponent`
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Render a JSON value the way JavaScript's `String(value)` would
pub fn js_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e21 => {
                format!("{float:.0}")
            }
            _ => number.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

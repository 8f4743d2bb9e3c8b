//! JSON-RPC envelope handling.

use serde_json::{Map, Value};

/// Returns the effective frame: the `result` object when present, otherwise
/// the frame itself. Only one level is unwrapped.
#[must_use]
pub fn unwrap_envelope(frame: &Map<String, Value>) -> &Map<String, Value> {
    match frame.get("result") {
        Some(Value::Object(result)) => result,
        _ => frame,
    }
}

/// Returns the remote error message when the frame is a JSON-RPC error
/// response, meaning it carries `error` and no `result`.
#[must_use]
pub fn envelope_fault(frame: &Map<String, Value>) -> Option<String> {
    if frame.contains_key("result") {
        return None;
    }

    match frame.get("error")? {
        Value::Null => None,
        Value::Object(error) => {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| Value::Object(error.clone()).to_string(), str::to_owned);
            let code = error.get("code").and_then(Value::as_i64);
            Some(code.map_or_else(
                || message.clone(),
                |number| format!("{message} (code {number})"),
            ))
        }
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

/// Returns the frame kind: the `kind` string, or `type` when `kind` is
/// absent. A non-string `kind` yields no kind.
#[must_use]
pub fn frame_kind(frame: &Map<String, Value>) -> Option<&str> {
    let member = if frame.contains_key("kind") { "kind" } else { "type" };
    frame.get(member).and_then(Value::as_str)
}

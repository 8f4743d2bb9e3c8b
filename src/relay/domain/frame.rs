//! Raw protocol frames received from remote agents.

use super::{RelayError, RelayResult};
use serde_json::{Map, Value};

/// One unprocessed JSON object from a remote stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame(Map<String, Value>);

impl RawFrame {
    /// Parses a frame from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MalformedFrame`] when the text is not JSON or
    /// not a JSON object.
    pub fn parse(text: &str) -> RelayResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| RelayError::MalformedFrame(err.to_string()))?;
        Self::from_value(value)
    }

    /// Wraps a decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MalformedFrame`] when the value is not an object.
    pub fn from_value(value: Value) -> RelayResult<Self> {
        match value {
            Value::Object(members) => Ok(Self(members)),
            other => Err(RelayError::MalformedFrame(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Returns the frame members.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the frame members, consuming the frame.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawFrame {
    fn from(members: Map<String, Value>) -> Self {
        Self(members)
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

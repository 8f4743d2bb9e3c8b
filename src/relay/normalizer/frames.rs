//! Typed views of the frame kinds the relay interprets.
//!
//! Every member is optional so partial frames decode. A member present with
//! the wrong JSON type reads as absent, so a recognised kind always decodes.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Default task status when a `task` frame omits one.
pub const DEFAULT_TASK_STATUS: &str = "created";

/// Default artifact name when neither `name` nor `artifactId` is present.
pub const DEFAULT_ARTIFACT_NAME: &str = "Generated Content";

/// Default artifact type.
pub const DEFAULT_ARTIFACT_TYPE: &str = "text";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskStatus {
    #[serde(deserialize_with = "lenient")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub message: Option<StatusMessage>,
    #[serde(deserialize_with = "lenient")]
    pub progress: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusMessage {
    #[serde(deserialize_with = "lenient")]
    pub parts: Option<Vec<Value>>,
}

/// `task` frame.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFrame {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub task_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<TaskStatus>,
}

/// `status-update` frame.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusUpdateFrame {
    #[serde(deserialize_with = "lenient")]
    pub task_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<TaskStatus>,
    #[serde(deserialize_with = "lenient")]
    pub progress: Option<Value>,
    #[serde(rename = "final", deserialize_with = "lenient")]
    pub is_final: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Artifact {
    #[serde(deserialize_with = "lenient")]
    pub artifact_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub artifact_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub parts: Option<Vec<Value>>,
}

/// `artifact-update` frame.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtifactUpdateFrame {
    #[serde(deserialize_with = "lenient")]
    pub task_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub artifact: Option<Artifact>,
}

/// Frame decoded according to its kind.
#[derive(Debug)]
pub enum DecodedFrame {
    Task(TaskFrame),
    StatusUpdate(StatusUpdateFrame),
    ArtifactUpdate(ArtifactUpdateFrame),
    Passthrough,
}

/// Decodes the effective frame into the variant named by `kind`.
#[must_use]
pub fn decode(kind: Option<&str>, frame: &Map<String, Value>) -> DecodedFrame {
    match kind {
        Some("task") => DecodedFrame::Task(from_members(frame)),
        Some("status-update") => DecodedFrame::StatusUpdate(from_members(frame)),
        Some("artifact-update") => DecodedFrame::ArtifactUpdate(from_members(frame)),
        _ => DecodedFrame::Passthrough,
    }
}

fn from_members<T: DeserializeOwned + Default>(frame: &Map<String, Value>) -> T {
    serde_json::from_value(Value::Object(frame.clone())).unwrap_or_default()
}

/// Reads an optional member, treating `null` or a value of the wrong type
/// as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Returns the text of the first `kind == "text"` part with non-empty text.
#[must_use]
pub fn first_text_part(parts: Option<&[Value]>) -> &str {
    parts
        .unwrap_or_default()
        .iter()
        .filter(|part| part.get("kind").and_then(Value::as_str) == Some("text"))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

//! Canonical events emitted to relay consumers.

use super::RelayError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::fmt;

/// Type tag of a canonical event.
///
/// Frames of an unrecognised kind keep their kind string as
/// [`EventType::Passthrough`]. Remote kinds that collide with the terminal
/// names are never mapped onto [`EventType::Complete`] or
/// [`EventType::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Task creation or snapshot.
    Task,
    /// Incremental task status.
    StatusUpdate,
    /// Produced artifact content.
    ArtifactUpdate,
    /// Successful end of the relay.
    Complete,
    /// Failed end of the relay.
    Error,
    /// Frame without a usable kind.
    Unknown,
    /// Frame of a kind the relay does not interpret.
    Passthrough(String),
}

impl EventType {
    /// Maps a kind string reported by a remote agent.
    ///
    /// Missing, empty and reserved terminal kinds become
    /// [`EventType::Unknown`].
    #[must_use]
    pub fn from_remote_kind(kind: Option<&str>) -> Self {
        match kind {
            Some("task") => Self::Task,
            Some("status-update") => Self::StatusUpdate,
            Some("artifact-update") => Self::ArtifactUpdate,
            None | Some("" | "unknown" | "complete" | "error") => Self::Unknown,
            Some(other) => Self::Passthrough(other.to_owned()),
        }
    }

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Task => "task",
            Self::StatusUpdate => "status-update",
            Self::ArtifactUpdate => "artifact-update",
            Self::Complete => "complete",
            Self::Error => "error",
            Self::Unknown => "unknown",
            Self::Passthrough(kind) => kind,
        }
    }

    /// Returns whether the type ends a relay.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(match name.as_str() {
            "complete" => Self::Complete,
            "error" => Self::Error,
            other => Self::from_remote_kind(Some(other)),
        })
    }
}

/// Normalized, transport-agnostic relay event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    #[serde(rename = "type")]
    event_type: EventType,
    data: Map<String, Value>,
    timestamp: DateTime<Utc>,
}

impl CanonicalEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(
        event_type: EventType,
        data: Map<String, Value>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            event_type,
            data,
            timestamp,
        }
    }

    /// Creates the terminal `complete` event.
    #[must_use]
    pub fn complete(timestamp: DateTime<Utc>) -> Self {
        Self::new(EventType::Complete, Map::new(), timestamp)
    }

    /// Creates the terminal `error` event for `error`.
    #[must_use]
    pub fn error(error: &RelayError, timestamp: DateTime<Utc>) -> Self {
        let mut data = Map::new();
        data.insert("message".to_owned(), json!(error.to_string()));
        data.insert("code".to_owned(), json!(error.code()));
        Self::new(EventType::Error, data, timestamp)
    }

    /// Returns the event type.
    #[must_use]
    pub const fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// Returns the event payload.
    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Returns when the event was produced.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns whether this event ends the relay.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.event_type.is_terminal()
    }
}

//! Translation of raw protocol frames into canonical events.
//!
//! [`EventNormalizer`] consumes frames one at a time in arrival order and
//! emits at most one [`CanonicalEvent`] per frame. It is a two-state machine:
//! while streaming it converts frames, and once a terminal `complete` or
//! `error` event has been produced it emits nothing further.

mod envelope;
mod frames;

pub use envelope::{envelope_fault, frame_kind, unwrap_envelope};
pub use frames::{
    DEFAULT_ARTIFACT_NAME, DEFAULT_ARTIFACT_TYPE, DEFAULT_TASK_STATUS, first_text_part,
};

use crate::relay::domain::{CanonicalEvent, EventType, RawFrame, RelayError};
use frames::{ArtifactUpdateFrame, DecodedFrame, StatusUpdateFrame, TaskFrame, decode};
use mockable::Clock;
use serde_json::{Map, Value, json};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NormalizerState {
    Streaming,
    Terminated,
}

/// Stateful frame-to-event converter for a single relay.
pub struct EventNormalizer<'clock, C: Clock> {
    clock: &'clock C,
    state: NormalizerState,
}

impl<'clock, C: Clock> EventNormalizer<'clock, C> {
    /// Creates a normalizer that stamps events with `clock`.
    #[must_use]
    pub const fn new(clock: &'clock C) -> Self {
        Self {
            clock,
            state: NormalizerState::Streaming,
        }
    }

    /// Returns whether a terminal event has been produced.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state == NormalizerState::Terminated
    }

    /// Converts one frame.
    ///
    /// Returns `None` when the frame is dropped or the normalizer has already
    /// terminated. A JSON-RPC error frame yields the terminal `error` event.
    pub fn push(&mut self, frame: &RawFrame) -> Option<CanonicalEvent> {
        if self.is_terminated() {
            return None;
        }

        if let Some(message) = envelope_fault(frame.as_map()) {
            return self.fail(&RelayError::Protocol(message));
        }

        let effective = unwrap_envelope(frame.as_map());
        let kind = frame_kind(effective);
        let (event_type, data) = match decode(kind, effective) {
            DecodedFrame::Task(task) => (EventType::Task, task_data(task)),
            DecodedFrame::StatusUpdate(update) => {
                (EventType::StatusUpdate, status_update_data(update))
            }
            DecodedFrame::ArtifactUpdate(update) => {
                let Some(data) = artifact_update_data(update) else {
                    debug!("dropping artifact update without text content");
                    return None;
                };
                (EventType::ArtifactUpdate, data)
            }
            DecodedFrame::Passthrough => (EventType::from_remote_kind(kind), effective.clone()),
        };

        debug!(event_type = %event_type, "normalized frame");
        Some(CanonicalEvent::new(event_type, data, self.clock.utc()))
    }

    /// Produces the terminal `complete` event after the frames are exhausted.
    ///
    /// Returns `None` if the normalizer already terminated.
    pub fn finish(&mut self) -> Option<CanonicalEvent> {
        self.terminate()
            .then(|| CanonicalEvent::complete(self.clock.utc()))
    }

    /// Produces the terminal `error` event for `error`.
    ///
    /// Returns `None` if the normalizer already terminated.
    pub fn fail(&mut self, error: &RelayError) -> Option<CanonicalEvent> {
        self.terminate()
            .then(|| CanonicalEvent::error(error, self.clock.utc()))
    }

    fn terminate(&mut self) -> bool {
        let was_streaming = self.state == NormalizerState::Streaming;
        self.state = NormalizerState::Terminated;
        was_streaming
    }
}

fn task_data(task: TaskFrame) -> Map<String, Value> {
    let status = task
        .status
        .and_then(|status| status.state)
        .unwrap_or_else(|| DEFAULT_TASK_STATUS.to_owned());

    let mut data = Map::new();
    data.insert("taskId".to_owned(), json!(task.id.or(task.task_id)));
    data.insert("status".to_owned(), json!(status));
    data
}

fn status_update_data(update: StatusUpdateFrame) -> Map<String, Value> {
    let status = update.status.unwrap_or_default();
    let parts = status.message.and_then(|message| message.parts);
    let message = first_text_part(parts.as_deref());
    let progress = update.progress.or(status.progress).unwrap_or(Value::Null);

    let mut data = Map::new();
    data.insert("taskId".to_owned(), json!(update.task_id.or(update.id)));
    data.insert("message".to_owned(), json!(message));
    data.insert("progress".to_owned(), progress);
    data.insert("final".to_owned(), json!(update.is_final.unwrap_or(false)));
    data
}

fn artifact_update_data(update: ArtifactUpdateFrame) -> Option<Map<String, Value>> {
    let artifact = update.artifact.unwrap_or_default();
    let content = first_text_part(artifact.parts.as_deref());
    if content.is_empty() {
        return None;
    }

    let name = artifact
        .name
        .or(artifact.artifact_id)
        .unwrap_or_else(|| DEFAULT_ARTIFACT_NAME.to_owned());
    let artifact_type = artifact
        .artifact_type
        .unwrap_or_else(|| DEFAULT_ARTIFACT_TYPE.to_owned());

    let mut data = Map::new();
    data.insert("taskId".to_owned(), json!(update.task_id.or(update.id)));
    data.insert("name".to_owned(), json!(name));
    data.insert("content".to_owned(), json!(content));
    data.insert("artifactType".to_owned(), json!(artifact_type));
    Some(data)
}

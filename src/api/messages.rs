//! Server-sent event transport for relays.

use super::MessageRelay;
use crate::relay::{
    domain::CanonicalEvent,
    ports::{DescriptorResolver, SessionConnector},
};
use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt, stream};
use serde::Deserialize;
use serde_json::{Value, json};
use std::{convert::Infallible, sync::Arc};
use tracing::warn;

/// Payload of the final event written after the last canonical event.
pub const DONE_MARKER: &str = "[DONE]";

/// Body of `POST /a2a/{agent_id}/message`.
#[derive(Debug, Deserialize)]
pub(super) struct MessageBody {
    message: String,
}

fn to_sse(event: &CanonicalEvent) -> Event {
    Event::default().json_data(event).unwrap_or_else(|err| {
        warn!(error = %err, event_type = %event.event_type(), "failed to encode event");
        Event::default().data(encoding_failure(event.event_type().as_str()).to_string())
    })
}

/// Error event sent in place of an event that could not be encoded.
fn encoding_failure(event_type: &str) -> Value {
    json!({
        "type": "error",
        "data": {
            "message": format!("failed to encode {event_type} event"),
            "code": "protocol",
        },
    })
}

/// `POST /a2a/{agent_id}/message`
///
/// Streams every canonical event as `data: <json>` and closes with
/// `data: [DONE]`. Relay failures arrive as `error` events, never as an HTTP
/// error status. Disconnecting cancels the relay.
#[expect(clippy::unused_async, reason = "axum handlers must be async")]
pub(super) async fn send_message<D, S>(
    State(relay): State<Arc<MessageRelay<D, S>>>,
    Path(agent_id): Path<String>,
    Json(body): Json<MessageBody>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    D: DescriptorResolver + 'static,
    S: SessionConnector + 'static,
{
    let events = relay
        .relay(agent_id, body.message)
        .map(|event| Ok(to_sse(&event)));
    let done = stream::once(async { Ok(Event::default().data(DONE_MARKER)) });

    Sse::new(events.chain(done)).keep_alive(KeepAlive::default())
}

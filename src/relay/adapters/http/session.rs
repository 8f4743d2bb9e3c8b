//! Streaming `message/stream` sessions over HTTP.

use crate::{
    agent_registry::domain::AgentDescriptor,
    endpoint::EndpointUrl,
    relay::{
        domain::{OutboundMessage, RawFrame, RelayError, RelayResult},
        ports::{FrameStream, RemoteSession, SessionConnector},
    },
};
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::{StreamExt, future, stream};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use tracing::debug;

const JSON_RPC_VERSION: &str = "2.0";
const STREAM_METHOD: &str = "message/stream";
const EVENT_STREAM_MIME: &str = "text/event-stream";
const DONE_SENTINEL: &str = "[DONE]";

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: &'a str,
    method: &'static str,
    params: MessageSendParams<'a>,
}

#[derive(Serialize)]
struct MessageSendParams<'a> {
    message: &'a OutboundMessage,
}

/// Opens HTTP sessions against agent service URLs.
#[derive(Debug, Clone)]
pub struct HttpSessionConnector {
    client: reqwest::Client,
}

impl HttpSessionConnector {
    /// Creates a connector using `client`.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionConnector for HttpSessionConnector {
    async fn open(
        &self,
        descriptor: &AgentDescriptor,
        endpoint_url: &EndpointUrl,
    ) -> RelayResult<Box<dyn RemoteSession>> {
        let target = descriptor
            .url()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| endpoint_url.as_str())
            .to_owned();
        debug!(%target, agent = descriptor.name(), "opening agent session");

        Ok(Box::new(HttpRemoteSession {
            client: self.client.clone(),
            target,
        }))
    }
}

/// One JSON-RPC streaming call to an agent.
#[derive(Debug)]
pub struct HttpRemoteSession {
    client: reqwest::Client,
    target: String,
}

impl HttpRemoteSession {
    /// Returns the URL the message is posted to.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }
}

#[async_trait]
impl RemoteSession for HttpRemoteSession {
    async fn send_streaming(self: Box<Self>, message: OutboundMessage) -> RelayResult<FrameStream> {
        let request = JsonRpcRequest {
            jsonrpc: JSON_RPC_VERSION,
            id: message.request_id(),
            method: STREAM_METHOD,
            params: MessageSendParams { message: &message },
        };

        let response = self
            .client
            .post(&self.target)
            .header(ACCEPT, EVENT_STREAM_MIME)
            .json(&request)
            .send()
            .await
            .map_err(|err| RelayError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Transport(format!(
                "agent at {} answered with status {status}",
                self.target
            )));
        }

        let is_event_stream = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|mime| mime.starts_with(EVENT_STREAM_MIME));

        if is_event_stream {
            return Ok(event_stream_frames(response));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| RelayError::Transport(err.to_string()))?;
        let frame = serde_json::from_slice(&body)
            .map_err(|err| RelayError::MalformedFrame(err.to_string()))
            .and_then(RawFrame::from_value);
        Ok(stream::once(future::ready(frame)).boxed())
    }
}

fn event_stream_frames(response: reqwest::Response) -> FrameStream {
    response
        .bytes_stream()
        .eventsource()
        .filter_map(|item| {
            future::ready(match item {
                Ok(event) => frame_from_data(&event.data),
                Err(err) => Some(Err(RelayError::Transport(err.to_string()))),
            })
        })
        .boxed()
}

fn frame_from_data(data: &str) -> Option<RelayResult<RawFrame>> {
    let payload = data.trim();
    if payload.is_empty() || payload == DONE_SENTINEL {
        return None;
    }
    Some(RawFrame::parse(payload))
}

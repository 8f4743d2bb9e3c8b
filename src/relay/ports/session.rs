//! Remote session port.

use crate::{
    agent_registry::domain::AgentDescriptor,
    endpoint::EndpointUrl,
    relay::domain::{OutboundMessage, RawFrame, RelayResult},
};
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Lazy, finite sequence of raw frames from one streaming send.
///
/// An `Err` item carrying a terminal error ends the sequence.
pub type FrameStream = BoxStream<'static, RelayResult<RawFrame>>;

/// Opens sessions to remote agents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionConnector: Send + Sync {
    /// Opens a session to the agent described by `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::relay::domain::RelayError::Transport`] when the
    /// session cannot be established.
    async fn open(
        &self,
        descriptor: &AgentDescriptor,
        endpoint_url: &EndpointUrl,
    ) -> RelayResult<Box<dyn RemoteSession>>;
}

/// Single-use logical session with a remote agent.
#[async_trait]
pub trait RemoteSession: Send {
    /// Sends `message` and returns the response frames.
    ///
    /// Sending consumes the session. Dropping the returned stream closes the
    /// underlying connection.
    ///
    /// # Errors
    ///
    /// Returns [`crate::relay::domain::RelayError::Transport`] when the
    /// request fails or the agent answers with a non-success status.
    async fn send_streaming(self: Box<Self>, message: OutboundMessage) -> RelayResult<FrameStream>;
}

//! Failure taxonomy for relay invocations.

use thiserror::Error;

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// Errors raised while relaying a message to a remote agent.
///
/// Every variant except [`RelayError::MalformedFrame`] ends the relay and is
/// reported to the consumer as a single `error` event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    /// The agent identifier is not registered.
    #[error("agent not found: {0}")]
    AgentNotFound(String),

    /// The agent descriptor could not be fetched or decoded.
    #[error("agent descriptor unavailable at {url}: {reason}")]
    DescriptorUnavailable {
        /// Descriptor URL that was requested.
        url: String,
        /// Underlying failure.
        reason: String,
    },

    /// Connection failure, non-success status, or a dropped stream.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote agent answered with a protocol-level error.
    #[error("remote agent error: {0}")]
    Protocol(String),

    /// A frame that is not a JSON object. Skipped, never terminal.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
}

impl RelayError {
    /// Returns a stable snake_case name for the error kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AgentNotFound(_) => "agent_not_found",
            Self::DescriptorUnavailable { .. } => "descriptor_unavailable",
            Self::Transport(_) => "transport",
            Self::Protocol(_) => "protocol",
            Self::MalformedFrame(_) => "malformed_frame",
        }
    }

    /// Returns whether the error ends the relay.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::MalformedFrame(_))
    }

    /// Builds a descriptor failure for `url`.
    #[must_use]
    pub fn descriptor(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DescriptorUnavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

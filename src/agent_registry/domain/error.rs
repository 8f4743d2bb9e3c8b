//! Error types for agent registry domain validation and parsing.

use crate::endpoint::EndpointUrlError;
use thiserror::Error;

/// Errors returned while constructing agent registry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentDomainError {
    /// The agent endpoint URL failed validation.
    #[error(transparent)]
    Endpoint(#[from] EndpointUrlError),

    /// The agent identifier is empty after trimming.
    #[error("agent identifier must not be empty")]
    EmptyAgentId,
}

/// Error returned while parsing an agent status string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown agent status: {0}")]
pub struct ParseAgentStatusError(pub String);

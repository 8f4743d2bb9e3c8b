//! Error types for tool-server domain validation.

use super::McpServerId;
use crate::endpoint::EndpointUrlError;
use thiserror::Error;

/// Errors returned while constructing or mutating tool registry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolRegistryDomainError {
    /// The server endpoint URL is invalid.
    #[error(transparent)]
    Endpoint(#[from] EndpointUrlError),

    /// The server identifier is empty after trimming.
    #[error("MCP server identifier must not be empty")]
    EmptyServerId,

    /// The server name is empty after trimming.
    #[error("MCP server name must not be empty")]
    EmptyServerName,

    /// The server name exceeds the 100-character limit.
    #[error("MCP server name exceeds 100 character limit: {0}")]
    ServerNameTooLong(String),

    /// A tool definition is not a JSON object.
    #[error("tool definition must be a JSON object")]
    InvalidToolDefinition,

    /// A tool definition name is missing or empty after trimming.
    #[error("tool name must not be empty")]
    EmptyToolName,

    /// The server has no tool with the given name.
    #[error("MCP server {server_id} has no tool named '{tool_name}'")]
    ToolNotFound {
        /// Server identifier.
        server_id: McpServerId,
        /// Requested tool name.
        tool_name: String,
    },
}

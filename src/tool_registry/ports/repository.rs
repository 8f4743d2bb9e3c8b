//! Repository port for tool-server registrations.

use crate::tool_registry::domain::{McpServerId, McpServerName, McpServerRegistration};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tool-server registry operations.
pub type McpServerRegistryResult<T> = Result<T, McpServerRegistryError>;

/// Persistence contract for tool-server registrations.
#[async_trait]
pub trait McpServerRegistryRepository: Send + Sync {
    /// Stores a new registration.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerRegistryError::DuplicateServer`] when the ID already
    /// exists or [`McpServerRegistryError::DuplicateServerName`] when the name
    /// is taken.
    async fn register(&self, server: &McpServerRegistration) -> McpServerRegistryResult<()>;

    /// Replaces an existing registration.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerRegistryError::NotFound`] when the server does not
    /// exist or [`McpServerRegistryError::DuplicateServerName`] when a rename
    /// collides with another server.
    async fn update(&self, server: &McpServerRegistration) -> McpServerRegistryResult<()>;

    /// Finds a registration by identifier.
    async fn find_by_id(
        &self,
        server_id: &McpServerId,
    ) -> McpServerRegistryResult<Option<McpServerRegistration>>;

    /// Finds a registration by name.
    async fn find_by_name(
        &self,
        server_name: &McpServerName,
    ) -> McpServerRegistryResult<Option<McpServerRegistration>>;

    /// Returns all registrations, oldest first.
    async fn list_all(&self) -> McpServerRegistryResult<Vec<McpServerRegistration>>;

    /// Removes a registration and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerRegistryError::NotFound`] when the server does not
    /// exist.
    async fn delete(&self, server_id: &McpServerId) -> McpServerRegistryResult<McpServerRegistration>;
}

/// Errors returned by tool-server registry repository implementations.
#[derive(Debug, Clone, Error)]
pub enum McpServerRegistryError {
    /// A server with the same identifier already exists.
    #[error("duplicate MCP server identifier: {0}")]
    DuplicateServer(McpServerId),

    /// A server with the same name already exists.
    #[error("duplicate MCP server name: {0}")]
    DuplicateServerName(McpServerName),

    /// The server was not found.
    #[error("MCP server not found: {0}")]
    NotFound(McpServerId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl McpServerRegistryError {
    /// Wraps a persistence-layer failure.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

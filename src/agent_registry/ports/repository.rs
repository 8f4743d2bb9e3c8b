//! Repository port for agent registration persistence.

use crate::agent_registry::domain::{AgentId, AgentRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for agent registry repository operations.
pub type AgentRegistryResult<T> = Result<T, AgentRegistryError>;

/// Agent registry persistence contract.
#[async_trait]
pub trait AgentRegistryRepository: Send + Sync {
    /// Stores a new agent record.
    ///
    /// # Errors
    ///
    /// Returns [`AgentRegistryError::DuplicateAgent`] when the identifier is
    /// already registered.
    async fn register(&self, record: &AgentRecord) -> AgentRegistryResult<()>;

    /// Replaces an existing agent record.
    ///
    /// # Errors
    ///
    /// Returns [`AgentRegistryError::NotFound`] when the agent does not exist.
    async fn update(&self, record: &AgentRecord) -> AgentRegistryResult<()>;

    /// Finds an agent record by identifier.
    ///
    /// Returns `None` when the agent does not exist.
    async fn find_by_id(&self, id: &AgentId) -> AgentRegistryResult<Option<AgentRecord>>;

    /// Returns all agent records.
    async fn list_all(&self) -> AgentRegistryResult<Vec<AgentRecord>>;

    /// Removes an agent record and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AgentRegistryError::NotFound`] when the agent does not exist.
    async fn delete(&self, id: &AgentId) -> AgentRegistryResult<AgentRecord>;
}

/// Errors returned by agent registry repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AgentRegistryError {
    /// An agent with the same identifier already exists.
    #[error("duplicate agent identifier: {0}")]
    DuplicateAgent(AgentId),

    /// The agent was not found.
    #[error("agent not found: {0}")]
    NotFound(AgentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AgentRegistryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

//! Service layer for agent registration and discovery.
//!
//! Provides [`AgentRegistryService`] which coordinates registration, updates,
//! enablement and removal of remote agents.

use crate::{
    agent_registry::{
        domain::{AgentDescriptor, AgentDomainError, AgentId, AgentRecord, AgentRecordDetails},
        ports::{AgentRegistryError, AgentRegistryRepository},
    },
    endpoint::EndpointUrl,
};
use mockable::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering or updating an agent.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterAgentRequest {
    endpoint_url: String,
    descriptor: Option<AgentDescriptor>,
    metadata: Map<String, Value>,
}

impl RegisterAgentRequest {
    /// Creates a request for the given endpoint URL.
    #[must_use]
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            descriptor: None,
            metadata: Map::new(),
        }
    }

    /// Attaches the descriptor captured from the agent card.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: AgentDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// Sets registry metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    fn into_details(self) -> Result<AgentRecordDetails, AgentDomainError> {
        let endpoint_url = EndpointUrl::new(self.endpoint_url)?;
        let mut details = AgentRecordDetails::new(endpoint_url).with_metadata(self.metadata);
        details.descriptor = self.descriptor;
        Ok(details)
    }
}

/// Service-level errors for agent registry operations.
#[derive(Debug, Error)]
pub enum AgentRegistryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AgentDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AgentRegistryError),
}

/// Result type for agent registry service operations.
pub type AgentRegistryServiceResult<T> = Result<T, AgentRegistryServiceError>;

/// Agent registration and discovery service.
#[derive(Clone)]
pub struct AgentRegistryService<R, C>
where
    R: AgentRegistryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> AgentRegistryService<R, C>
where
    R: AgentRegistryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new agent registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new agent. New agents start enabled.
    ///
    /// # Errors
    ///
    /// Returns [`AgentRegistryServiceError`] when the endpoint URL is invalid
    /// or the repository rejects the record.
    pub async fn register(
        &self,
        request: RegisterAgentRequest,
    ) -> AgentRegistryServiceResult<AgentRecord> {
        let record = AgentRecord::new(request.into_details()?, &*self.clock);
        self.repository.register(&record).await?;
        info!(agent_id = %record.id(), endpoint = %record.endpoint_url(), "agent registered");
        Ok(record)
    }

    /// Replaces endpoint, descriptor and metadata of an existing agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentRegistryServiceError::Repository`] with
    /// [`AgentRegistryError::NotFound`] for unknown agents, or a domain error
    /// when the endpoint URL is invalid.
    pub async fn update(
        &self,
        id: &AgentId,
        request: RegisterAgentRequest,
    ) -> AgentRegistryServiceResult<AgentRecord> {
        let details = request.into_details()?;
        let mut record = self.find_by_id_or_error(id).await?;
        record.update_details(details, &*self.clock);
        self.repository.update(&record).await?;
        info!(agent_id = %id, "agent updated");
        Ok(record)
    }

    /// Finds an agent by identifier.
    ///
    /// Returns `Ok(None)` when no agent has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`AgentRegistryServiceError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: &AgentId) -> AgentRegistryServiceResult<Option<AgentRecord>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns every registered agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentRegistryServiceError::Repository`] when listing fails.
    pub async fn list_all(&self) -> AgentRegistryServiceResult<Vec<AgentRecord>> {
        Ok(self.repository.list_all().await?)
    }

    /// Removes an agent from the registry.
    ///
    /// Relays already running against the agent keep their snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AgentRegistryServiceError::Repository`] when the agent does
    /// not exist or removal fails.
    pub async fn delete(&self, id: &AgentId) -> AgentRegistryServiceResult<AgentRecord> {
        let removed = self.repository.delete(id).await?;
        info!(agent_id = %id, "agent deleted");
        Ok(removed)
    }

    /// Enables an agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentRegistryServiceError::Repository`] when the agent is not
    /// found or persistence fails.
    pub async fn enable(&self, id: &AgentId) -> AgentRegistryServiceResult<AgentRecord> {
        let mut record = self.find_by_id_or_error(id).await?;
        record.enable(&*self.clock);
        self.repository.update(&record).await?;
        Ok(record)
    }

    /// Disables an agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentRegistryServiceError::Repository`] when the agent is not
    /// found or persistence fails.
    pub async fn disable(&self, id: &AgentId) -> AgentRegistryServiceResult<AgentRecord> {
        let mut record = self.find_by_id_or_error(id).await?;
        record.disable(&*self.clock);
        self.repository.update(&record).await?;
        Ok(record)
    }

    async fn find_by_id_or_error(&self, id: &AgentId) -> AgentRegistryServiceResult<AgentRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AgentRegistryError::NotFound(id.clone()).into())
    }
}

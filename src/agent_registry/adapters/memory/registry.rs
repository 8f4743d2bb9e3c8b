//! Keyed in-memory store for agent records.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::agent_registry::{
    domain::{AgentId, AgentRecord},
    ports::{AgentLookup, AgentRegistryError, AgentRegistryRepository, AgentRegistryResult},
};

/// Thread-safe in-memory agent registry.
///
/// Implements both the persistence port used by registry services and the
/// snapshot lookup used by the relay. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAgentRegistry {
    agents: Arc<RwLock<HashMap<AgentId, AgentRecord>>>,
}

impl InMemoryAgentRegistry {
    /// Creates an empty in-memory registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> AgentRegistryError {
    AgentRegistryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AgentRegistryRepository for InMemoryAgentRegistry {
    async fn register(&self, record: &AgentRecord) -> AgentRegistryResult<()> {
        let mut agents = self.agents.write().map_err(lock_error)?;

        if agents.contains_key(record.id()) {
            return Err(AgentRegistryError::DuplicateAgent(record.id().clone()));
        }

        agents.insert(record.id().clone(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &AgentRecord) -> AgentRegistryResult<()> {
        let mut agents = self.agents.write().map_err(lock_error)?;

        let Some(stored) = agents.get_mut(record.id()) else {
            return Err(AgentRegistryError::NotFound(record.id().clone()));
        };
        *stored = record.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &AgentId) -> AgentRegistryResult<Option<AgentRecord>> {
        let agents = self.agents.read().map_err(lock_error)?;
        Ok(agents.get(id).cloned())
    }

    async fn list_all(&self) -> AgentRegistryResult<Vec<AgentRecord>> {
        let agents = self.agents.read().map_err(lock_error)?;
        let mut records: Vec<AgentRecord> = agents.values().cloned().collect();
        records.sort_by_key(AgentRecord::created_at);
        Ok(records)
    }

    async fn delete(&self, id: &AgentId) -> AgentRegistryResult<AgentRecord> {
        let mut agents = self.agents.write().map_err(lock_error)?;
        agents
            .remove(id)
            .ok_or_else(|| AgentRegistryError::NotFound(id.clone()))
    }
}

impl AgentLookup for InMemoryAgentRegistry {
    fn get_agent(&self, id: &AgentId) -> Option<AgentRecord> {
        self.agents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }
}

//! In-memory repository for tool-server registrations.

use crate::tool_registry::{
    domain::{McpServerId, McpServerName, McpServerRegistration},
    ports::{McpServerRegistryError, McpServerRegistryRepository, McpServerRegistryResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory tool-server registry with a unique name index.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMcpServerRegistry {
    state: Arc<RwLock<RegistryState>>,
}

#[derive(Debug, Default)]
struct RegistryState {
    servers: HashMap<McpServerId, McpServerRegistration>,
    name_index: HashMap<McpServerName, McpServerId>,
}

impl InMemoryMcpServerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> McpServerRegistryError {
    McpServerRegistryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl McpServerRegistryRepository for InMemoryMcpServerRegistry {
    async fn register(&self, server: &McpServerRegistration) -> McpServerRegistryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        if state.servers.contains_key(server.id()) {
            return Err(McpServerRegistryError::DuplicateServer(server.id().clone()));
        }
        if state.name_index.contains_key(server.name()) {
            return Err(McpServerRegistryError::DuplicateServerName(
                server.name().clone(),
            ));
        }

        state
            .name_index
            .insert(server.name().clone(), server.id().clone());
        state.servers.insert(server.id().clone(), server.clone());
        Ok(())
    }

    async fn update(&self, server: &McpServerRegistration) -> McpServerRegistryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        let stored_name = state
            .servers
            .get(server.id())
            .ok_or_else(|| McpServerRegistryError::NotFound(server.id().clone()))?
            .name()
            .clone();

        if *server.name() != stored_name {
            if let Some(indexed_id) = state.name_index.get(server.name())
                && indexed_id != server.id()
            {
                return Err(McpServerRegistryError::DuplicateServerName(
                    server.name().clone(),
                ));
            }

            state.name_index.remove(&stored_name);
            state
                .name_index
                .insert(server.name().clone(), server.id().clone());
        }

        state.servers.insert(server.id().clone(), server.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        server_id: &McpServerId,
    ) -> McpServerRegistryResult<Option<McpServerRegistration>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.servers.get(server_id).cloned())
    }

    async fn find_by_name(
        &self,
        server_name: &McpServerName,
    ) -> McpServerRegistryResult<Option<McpServerRegistration>> {
        let state = self.state.read().map_err(lock_error)?;
        let server = state
            .name_index
            .get(server_name)
            .and_then(|id| state.servers.get(id))
            .cloned();
        Ok(server)
    }

    async fn list_all(&self) -> McpServerRegistryResult<Vec<McpServerRegistration>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut servers: Vec<McpServerRegistration> = state.servers.values().cloned().collect();
        servers.sort_by_key(McpServerRegistration::created_at);
        Ok(servers)
    }

    async fn delete(
        &self,
        server_id: &McpServerId,
    ) -> McpServerRegistryResult<McpServerRegistration> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .servers
            .remove(server_id)
            .ok_or_else(|| McpServerRegistryError::NotFound(server_id.clone()))?;
        state.name_index.remove(removed.name());
        Ok(removed)
    }
}

//! Service layer for tool-server registration and catalog maintenance.

use crate::{
    endpoint::EndpointUrl,
    tool_registry::{
        domain::{
            McpServerDetails, McpServerId, McpServerName, McpServerRegistration,
            McpToolDefinition, ToolCatalogChange, ToolRegistryDomainError,
        },
        ports::{McpServerRegistryError, McpServerRegistryRepository},
    },
};
use mockable::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering or updating a tool server.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterMcpServerRequest {
    /// Unique display name.
    pub name: String,
    /// Server endpoint URL.
    pub server_url: String,
    /// Advertised version.
    pub version: Option<String>,
    /// Free-form description.
    pub description: String,
    /// Search tags.
    pub tags: Vec<String>,
    /// Additional registry metadata.
    pub metadata: Map<String, Value>,
    /// Tool catalog. On update, `None` keeps the current catalog.
    pub tools: Option<Vec<Value>>,
}

impl RegisterMcpServerRequest {
    /// Creates a request with empty optional fields.
    #[must_use]
    pub fn new(name: impl Into<String>, server_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server_url: server_url.into(),
            version: None,
            description: String::new(),
            tags: Vec::new(),
            metadata: Map::new(),
            tools: None,
        }
    }

    /// Sets the initial tool catalog.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<Value>) -> Self {
        self.tools = Some(tools);
        self
    }

    fn into_parts(
        self,
    ) -> Result<(McpServerDetails, Option<Vec<McpToolDefinition>>), ToolRegistryDomainError> {
        let mut details = McpServerDetails::new(
            McpServerName::new(self.name)?,
            EndpointUrl::new(self.server_url)?,
        );
        details.version = self.version;
        details.description = self.description;
        details.tags = self.tags;
        details.metadata = self.metadata;

        let tools = self.tools.map(parse_tools).transpose()?;
        Ok((details, tools))
    }
}

fn parse_tools(raw: Vec<Value>) -> Result<Vec<McpToolDefinition>, ToolRegistryDomainError> {
    raw.into_iter().map(McpToolDefinition::from_value).collect()
}

/// Service-level errors for tool-server registry operations.
#[derive(Debug, Error)]
pub enum McpServerRegistryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ToolRegistryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] McpServerRegistryError),
    /// No server exists with the given identifier.
    #[error("MCP server {0} not found")]
    NotFound(McpServerId),
}

/// Result type for tool-server registry service operations.
pub type McpServerRegistryServiceResult<T> = Result<T, McpServerRegistryServiceError>;

/// Tool-server registration and catalog service.
#[derive(Clone)]
pub struct McpServerRegistryService<R, C>
where
    R: McpServerRegistryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> McpServerRegistryService<R, C>
where
    R: McpServerRegistryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    async fn find_server_or_error(
        &self,
        server_id: &McpServerId,
    ) -> McpServerRegistryServiceResult<McpServerRegistration> {
        self.repository
            .find_by_id(server_id)
            .await?
            .ok_or_else(|| McpServerRegistryServiceError::NotFound(server_id.clone()))
    }

    /// Registers a new, enabled tool server.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerRegistryServiceError`] when validation fails or the
    /// name is already registered.
    pub async fn register(
        &self,
        request: RegisterMcpServerRequest,
    ) -> McpServerRegistryServiceResult<McpServerRegistration> {
        let (details, tools) = request.into_parts()?;
        let mut server = McpServerRegistration::new(details, &*self.clock);
        if let Some(initial) = tools {
            server.upsert_tools(initial, &*self.clock);
        }
        self.repository.register(&server).await?;
        info!(server_id = %server.id(), name = %server.name(), tools = server.tools().len(), "MCP server registered");
        Ok(server)
    }

    /// Replaces the details of an existing server.
    ///
    /// When the request carries tools, the catalog is replaced as well.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerRegistryServiceError::NotFound`] for unknown
    /// servers, domain errors for invalid input, or repository errors.
    pub async fn update(
        &self,
        server_id: &McpServerId,
        request: RegisterMcpServerRequest,
    ) -> McpServerRegistryServiceResult<McpServerRegistration> {
        let (details, tools) = request.into_parts()?;
        let mut server = self.find_server_or_error(server_id).await?;
        server.update_details(details, &*self.clock);
        if let Some(replacement) = tools {
            server.clear_tools(&*self.clock);
            server.upsert_tools(replacement, &*self.clock);
        }
        self.repository.update(&server).await?;
        info!(server_id = %server_id, "MCP server updated");
        Ok(server)
    }

    /// Finds a server by identifier.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn find_by_id(
        &self,
        server_id: &McpServerId,
    ) -> McpServerRegistryServiceResult<Option<McpServerRegistration>> {
        Ok(self.repository.find_by_id(server_id).await?)
    }

    /// Finds a server by name.
    ///
    /// # Errors
    ///
    /// Returns domain validation errors when the name is blank and repository
    /// errors.
    pub async fn find_by_name(
        &self,
        server_name: &str,
    ) -> McpServerRegistryServiceResult<Option<McpServerRegistration>> {
        let validated_name = McpServerName::new(server_name)?;
        Ok(self.repository.find_by_name(&validated_name).await?)
    }

    /// Lists all registered servers.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_all(&self) -> McpServerRegistryServiceResult<Vec<McpServerRegistration>> {
        Ok(self.repository.list_all().await?)
    }

    /// Removes a server.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerRegistryServiceError::Repository`] when the server
    /// does not exist.
    pub async fn delete(
        &self,
        server_id: &McpServerId,
    ) -> McpServerRegistryServiceResult<McpServerRegistration> {
        let removed = self.repository.delete(server_id).await?;
        info!(server_id = %server_id, "MCP server deleted");
        Ok(removed)
    }

    /// Returns the tool catalog of a server.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerRegistryServiceError::NotFound`] for unknown
    /// servers.
    pub async fn list_tools(
        &self,
        server_id: &McpServerId,
    ) -> McpServerRegistryServiceResult<Vec<McpToolDefinition>> {
        let server = self.find_server_or_error(server_id).await?;
        Ok(server.tools().to_vec())
    }

    /// Merges tool definitions into a server's catalog by name.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerRegistryServiceError::NotFound`] for unknown
    /// servers and domain errors for invalid tool definitions. Nothing is
    /// stored if any definition is invalid.
    pub async fn upsert_tools(
        &self,
        server_id: &McpServerId,
        tools: Vec<Value>,
    ) -> McpServerRegistryServiceResult<ToolCatalogChange> {
        let definitions = parse_tools(tools)?;
        let mut server = self.find_server_or_error(server_id).await?;
        let change = server.upsert_tools(definitions, &*self.clock);
        self.repository.update(&server).await?;
        info!(
            server_id = %server_id,
            added = change.added,
            replaced = change.replaced,
            "MCP tool catalog updated"
        );
        Ok(change)
    }

    /// Removes one tool from a server's catalog.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerRegistryServiceError::NotFound`] for unknown
    /// servers and [`ToolRegistryDomainError::ToolNotFound`] for unknown
    /// tools.
    pub async fn remove_tool(
        &self,
        server_id: &McpServerId,
        tool_name: &str,
    ) -> McpServerRegistryServiceResult<McpToolDefinition> {
        let mut server = self.find_server_or_error(server_id).await?;
        let removed = server.remove_tool(tool_name, &*self.clock)?;
        self.repository.update(&server).await?;
        info!(server_id = %server_id, tool = tool_name, "MCP tool removed");
        Ok(removed)
    }

    /// Removes every tool from a server's catalog.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerRegistryServiceError::NotFound`] for unknown
    /// servers.
    pub async fn clear_tools(&self, server_id: &McpServerId) -> McpServerRegistryServiceResult<usize> {
        let mut server = self.find_server_or_error(server_id).await?;
        let removed = server.clear_tools(&*self.clock);
        self.repository.update(&server).await?;
        info!(server_id = %server_id, removed, "MCP tool catalog cleared");
        Ok(removed)
    }
}

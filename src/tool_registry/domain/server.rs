//! Tool-server registration aggregate root.

use super::{McpServerId, McpServerName, McpToolDefinition, ToolRegistryDomainError};
use crate::endpoint::EndpointUrl;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-editable details of a tool server.
#[derive(Debug, Clone, PartialEq)]
pub struct McpServerDetails {
    /// Unique display name.
    pub name: McpServerName,
    /// Endpoint the server is reachable on.
    pub server_url: EndpointUrl,
    /// Advertised server version.
    pub version: Option<String>,
    /// Free-form description.
    pub description: String,
    /// Search tags.
    pub tags: Vec<String>,
    /// Additional registry metadata (type, scope, protocol, ...).
    pub metadata: Map<String, Value>,
}

impl McpServerDetails {
    /// Creates details with empty optional fields.
    #[must_use]
    pub fn new(name: McpServerName, server_url: EndpointUrl) -> Self {
        Self {
            name,
            server_url,
            version: None,
            description: String::new(),
            tags: Vec::new(),
            metadata: Map::new(),
        }
    }
}

/// Counts reported by [`McpServerRegistration::upsert_tools`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ToolCatalogChange {
    /// Tools appended to the catalog.
    pub added: usize,
    /// Tools that replaced an existing entry with the same name.
    pub replaced: usize,
}

/// Registered MCP tool server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServerRegistration {
    id: McpServerId,
    name: McpServerName,
    server_url: EndpointUrl,
    version: Option<String>,
    description: String,
    tags: Vec<String>,
    metadata: Map<String, Value>,
    enabled: bool,
    tools: Vec<McpToolDefinition>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl McpServerRegistration {
    /// Creates an enabled registration with an empty tool catalog.
    #[must_use]
    pub fn new(details: McpServerDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: McpServerId::new(),
            name: details.name,
            server_url: details.server_url,
            version: details.version,
            description: details.description,
            tags: details.tags,
            metadata: details.metadata,
            enabled: true,
            tools: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the server identifier.
    #[must_use]
    pub const fn id(&self) -> &McpServerId {
        &self.id
    }

    /// Returns the server name.
    #[must_use]
    pub const fn name(&self) -> &McpServerName {
        &self.name
    }

    /// Returns the server endpoint.
    #[must_use]
    pub const fn server_url(&self) -> &EndpointUrl {
        &self.server_url
    }

    /// Returns the advertised version.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the registry metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Returns whether the server is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the tool catalog in insertion order.
    #[must_use]
    pub fn tools(&self) -> &[McpToolDefinition] {
        &self.tools
    }

    /// Returns the tool with the given name.
    #[must_use]
    pub fn find_tool(&self, tool_name: &str) -> Option<&McpToolDefinition> {
        self.tools.iter().find(|tool| tool.name() == tool_name)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the editable details. The tool catalog is kept.
    pub fn update_details(&mut self, details: McpServerDetails, clock: &impl Clock) {
        self.name = details.name;
        self.server_url = details.server_url;
        self.version = details.version;
        self.description = details.description;
        self.tags = details.tags;
        self.metadata = details.metadata;
        self.touch(clock);
    }

    /// Enables or disables the server.
    pub fn set_enabled(&mut self, enabled: bool, clock: &impl Clock) {
        self.enabled = enabled;
        self.touch(clock);
    }

    /// Merges `tools` into the catalog.
    ///
    /// A tool whose name is already present replaces the existing entry in
    /// place; new names are appended in the given order.
    pub fn upsert_tools(
        &mut self,
        tools: Vec<McpToolDefinition>,
        clock: &impl Clock,
    ) -> ToolCatalogChange {
        let mut change = ToolCatalogChange::default();
        for tool in tools {
            let position = self
                .tools
                .iter()
                .position(|current| current.name() == tool.name());
            let Some(slot) = position.and_then(|index| self.tools.get_mut(index)) else {
                self.tools.push(tool);
                change.added += 1;
                continue;
            };
            *slot = tool;
            change.replaced += 1;
        }
        self.touch(clock);
        change
    }

    /// Removes the named tool and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryDomainError::ToolNotFound`] when the catalog has
    /// no tool with that name.
    pub fn remove_tool(
        &mut self,
        tool_name: &str,
        clock: &impl Clock,
    ) -> Result<McpToolDefinition, ToolRegistryDomainError> {
        let position = self
            .tools
            .iter()
            .position(|tool| tool.name() == tool_name)
            .ok_or_else(|| ToolRegistryDomainError::ToolNotFound {
                server_id: self.id.clone(),
                tool_name: tool_name.to_owned(),
            })?;
        let removed = self.tools.remove(position);
        self.touch(clock);
        Ok(removed)
    }

    /// Empties the catalog and returns how many tools were removed.
    pub fn clear_tools(&mut self, clock: &impl Clock) -> usize {
        let removed = self.tools.len();
        self.tools.clear();
        self.touch(clock);
        removed
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

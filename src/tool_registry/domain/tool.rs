//! Tool definitions advertised by MCP servers.

use super::ToolRegistryDomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata for one tool in a server's catalog.
///
/// Only `name` is required. Members other than `name`, `description` and
/// `inputSchema` are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpToolDefinition {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    input_schema: Value,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl McpToolDefinition {
    /// Creates a tool definition with a name and input schema.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryDomainError::EmptyToolName`] when the trimmed
    /// name is empty.
    pub fn new(name: impl Into<String>, input_schema: Value) -> Result<Self, ToolRegistryDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ToolRegistryDomainError::EmptyToolName);
        }

        Ok(Self {
            name: trimmed.to_owned(),
            description: None,
            input_schema,
            extra: Map::new(),
        })
    }

    /// Builds a definition from an arbitrary JSON tool description.
    ///
    /// # Errors
    ///
    /// Returns [`ToolRegistryDomainError::InvalidToolDefinition`] for
    /// non-objects and [`ToolRegistryDomainError::EmptyToolName`] when
    /// `name` is missing, not a string, or blank.
    pub fn from_value(value: Value) -> Result<Self, ToolRegistryDomainError> {
        let Value::Object(mut members) = value else {
            return Err(ToolRegistryDomainError::InvalidToolDefinition);
        };

        let name = match members.remove("name") {
            Some(Value::String(name)) => name,
            _ => return Err(ToolRegistryDomainError::EmptyToolName),
        };
        let description = match members.remove("description") {
            Some(Value::String(text)) => Some(text),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
        let input_schema = members
            .remove("inputSchema")
            .or_else(|| members.remove("input_schema"))
            .unwrap_or(Value::Null);

        let mut definition = Self::new(name, input_schema)?;
        definition.description = description;
        definition.extra = members;
        Ok(definition)
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the input schema, `null` when not declared.
    #[must_use]
    pub const fn input_schema(&self) -> &Value {
        &self.input_schema
    }

    /// Returns members not covered by the typed fields.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

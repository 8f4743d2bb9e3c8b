//! Capability descriptor derived from an agent card.

use super::AgentCardDocument;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Name, version and capabilities an agent advertises about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDescriptor {
    name: String,
    version: String,
    capabilities: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl AgentDescriptor {
    /// Creates a descriptor with no capabilities.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Builds a descriptor from a decoded agent card.
    ///
    /// Missing `name` and `version` default to empty strings. Capabilities are
    /// read from an object (members set to `true`) or a list of names; any
    /// other shape yields no capabilities.
    #[must_use]
    pub fn from_card(card: &AgentCardDocument) -> Self {
        let non_blank = |value: Option<&String>| {
            value
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty())
        };

        Self {
            name: card.name.clone().unwrap_or_default(),
            version: card.version.clone().unwrap_or_default(),
            capabilities: capability_names(card.capabilities.as_ref()),
            url: non_blank(card.url.as_ref()),
            description: non_blank(card.description.as_ref()),
        }
    }

    /// Sets the capability names.
    #[must_use]
    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the advertised service URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Returns the agent name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the agent version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the advertised capability names.
    #[must_use]
    pub const fn capabilities(&self) -> &BTreeSet<String> {
        &self.capabilities
    }

    /// Returns whether the named capability is advertised.
    #[must_use]
    pub fn supports(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    /// Returns the service URL the agent advertised, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the agent description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

fn capability_names(raw: Option<&Value>) -> BTreeSet<String> {
    match raw {
        Some(Value::Object(flags)) => flags
            .iter()
            .filter(|(_, enabled)| enabled.as_bool() == Some(true))
            .map(|(name, _)| name.clone())
            .collect(),
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => BTreeSet::new(),
    }
}

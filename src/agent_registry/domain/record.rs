//! Agent registration aggregate root.

use super::{AgentDescriptor, AgentId, AgentStatus};
use crate::endpoint::EndpointUrl;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mutable details of an agent registration.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRecordDetails {
    /// Endpoint the relay sends messages to.
    pub endpoint_url: EndpointUrl,
    /// Descriptor captured at registration time.
    pub descriptor: Option<AgentDescriptor>,
    /// Free-form registry metadata (type, tags, environment, ...).
    pub metadata: Map<String, Value>,
}

impl AgentRecordDetails {
    /// Creates details with no descriptor and empty metadata.
    #[must_use]
    pub fn new(endpoint_url: EndpointUrl) -> Self {
        Self {
            endpoint_url,
            descriptor: None,
            metadata: Map::new(),
        }
    }

    /// Sets the descriptor.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: AgentDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// Sets the metadata map.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Registered agent.
///
/// Records are owned by the registry. Consumers such as the relay work on
/// cloned snapshots, so a record deleted while a relay is running does not
/// affect that relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    id: AgentId,
    endpoint_url: EndpointUrl,
    descriptor: Option<AgentDescriptor>,
    status: AgentStatus,
    metadata: Map<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AgentRecord {
    /// Creates a new, enabled agent record with a fresh identifier.
    #[must_use]
    pub fn new(details: AgentRecordDetails, clock: &impl Clock) -> Self {
        Self::with_id(AgentId::new(), details, clock)
    }

    /// Creates a new, enabled agent record with the given identifier.
    #[must_use]
    pub fn with_id(id: AgentId, details: AgentRecordDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            endpoint_url: details.endpoint_url,
            descriptor: details.descriptor,
            status: AgentStatus::Enabled,
            metadata: details.metadata,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the agent identifier.
    #[must_use]
    pub const fn id(&self) -> &AgentId {
        &self.id
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub const fn endpoint_url(&self) -> &EndpointUrl {
        &self.endpoint_url
    }

    /// Returns the registered descriptor, if any.
    #[must_use]
    pub const fn descriptor(&self) -> Option<&AgentDescriptor> {
        self.descriptor.as_ref()
    }

    /// Returns the enablement status.
    #[must_use]
    pub const fn status(&self) -> AgentStatus {
        self.status
    }

    /// Returns the registry metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
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

    /// Replaces endpoint, descriptor and metadata.
    pub fn update_details(&mut self, details: AgentRecordDetails, clock: &impl Clock) {
        self.endpoint_url = details.endpoint_url;
        self.descriptor = details.descriptor;
        self.metadata = details.metadata;
        self.touch(clock);
    }

    /// Marks the agent as enabled.
    pub fn enable(&mut self, clock: &impl Clock) {
        self.status = AgentStatus::Enabled;
        self.touch(clock);
    }

    /// Marks the agent as disabled.
    pub fn disable(&mut self, clock: &impl Clock) {
        self.status = AgentStatus::Disabled;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

//! Agent descriptor resolution port.

use crate::{
    agent_registry::domain::AgentDescriptor, endpoint::EndpointUrl, relay::domain::RelayResult,
};
use async_trait::async_trait;

/// Well-known path of the agent card under an agent's base URL.
pub const AGENT_CARD_PATH: &str = "/.well-known/agent.json";

/// Fetches the capability descriptor an agent publishes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DescriptorResolver: Send + Sync {
    /// Resolves the descriptor published under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::relay::domain::RelayError::DescriptorUnavailable`]
    /// when the card cannot be fetched or decoded.
    async fn resolve(&self, base_url: &EndpointUrl) -> RelayResult<AgentDescriptor>;
}

//! Read-only registry lookup port consumed by the relay.

use crate::agent_registry::domain::{AgentId, AgentRecord};

/// Synchronous, side-effect-free agent lookup.
#[cfg_attr(test, mockall::automock)]
pub trait AgentLookup: Send + Sync {
    /// Returns a snapshot of the agent record, or `None` when the identifier
    /// is not registered.
    fn get_agent(&self, id: &AgentId) -> Option<AgentRecord>;
}

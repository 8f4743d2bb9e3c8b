//! Port contracts for the agent registry.
//!
//! [`AgentRegistryRepository`] is the asynchronous persistence contract used
//! by registry services; [`AgentLookup`] is the synchronous snapshot read
//! consumed by the relay.

pub mod lookup;
pub mod repository;

pub use lookup::AgentLookup;
pub use repository::{AgentRegistryError, AgentRegistryRepository, AgentRegistryResult};

#[cfg(test)]
pub use lookup::MockAgentLookup;

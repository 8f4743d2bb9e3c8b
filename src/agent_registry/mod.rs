//! Registry of remote agent endpoints.
//!
//! Agents are registered with an endpoint URL, an optional capability
//! descriptor, and free-form metadata. The relay reads registry snapshots
//! through the [`ports::AgentLookup`] port and never mutates them. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

//! Registry of remote MCP tool servers and their tool catalogs.
//!
//! Servers are registered with a unique display name and an HTTP endpoint.
//! Each registration carries the catalog of tools the server exposes, which
//! callers maintain by tool name. The module follows hexagonal architecture:
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

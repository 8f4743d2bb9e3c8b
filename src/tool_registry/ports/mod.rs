//! Port contracts for the tool-server registry.

pub mod repository;

pub use repository::{McpServerRegistryError, McpServerRegistryRepository, McpServerRegistryResult};

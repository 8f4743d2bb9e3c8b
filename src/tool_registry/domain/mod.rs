//! Domain model for remote MCP tool servers and their tool catalogs.
//!
//! A tool server is registered with a display name and an HTTP endpoint and
//! carries the catalog of tools it exposes. Catalog maintenance is keyed by
//! tool name.

mod error;
mod ids;
mod server;
mod tool;

pub use error::ToolRegistryDomainError;
pub use ids::{McpServerId, McpServerName};
pub use server::{McpServerDetails, McpServerRegistration, ToolCatalogChange};
pub use tool::McpToolDefinition;

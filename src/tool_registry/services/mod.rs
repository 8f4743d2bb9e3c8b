//! Application services for the tool-server registry.

mod registry;

pub use registry::{
    McpServerRegistryService, McpServerRegistryServiceError, McpServerRegistryServiceResult,
    RegisterMcpServerRequest,
};

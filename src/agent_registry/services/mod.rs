//! Application services for agent registration and discovery.

mod registry;

pub use registry::{
    AgentRegistryService, AgentRegistryServiceError, AgentRegistryServiceResult,
    RegisterAgentRequest,
};

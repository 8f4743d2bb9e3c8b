//! In-memory tool-server registry.

mod registry;

pub use registry::InMemoryMcpServerRegistry;

//! In-memory agent registry adapter.

mod registry;

pub use registry::InMemoryAgentRegistry;

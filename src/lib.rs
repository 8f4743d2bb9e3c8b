//! Gropius: agent registry and streaming message relay.
//!
//! Callers register remote agents and MCP tool servers, then send a message
//! to an agent and receive its reply as an ordered stream of canonical events.
//! Whatever protocol frames the agent emits, the stream ends with exactly one
//! `complete` or `error` event.
//!
//! # Architecture
//!
//! Gropius follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory)
//!
//! # Modules
//!
//! - [`agent_registry`]: Agent registrations, agent cards and card validation
//! - [`relay`]: Descriptor resolution, remote sessions and event normalization
//! - [`tool_registry`]: MCP tool servers and their tool catalogs
//! - [`api`]: HTTP routes and the server-sent event transport

pub mod agent_registry;
pub mod api;
pub mod config;
pub mod endpoint;
pub mod relay;
pub mod telemetry;
pub mod tool_registry;

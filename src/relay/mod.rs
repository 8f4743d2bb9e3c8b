//! Message relay and event normalization.
//!
//! A relay looks up an agent, resolves its descriptor, opens a streaming
//! session, and translates the agent's raw protocol frames into a fixed
//! vocabulary of [`domain::CanonicalEvent`]s. Every relay ends with exactly
//! one `complete` or `error` event.
//!
//! - Domain types in [`domain`]
//! - The frame-to-event state machine in [`normalizer`]
//! - Port contracts in [`ports`]
//! - HTTP and scripted adapters in [`adapters`]
//! - The relay orchestrator in [`services`]

pub mod adapters;
pub mod domain;
pub mod normalizer;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

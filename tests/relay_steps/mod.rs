//! Step definitions for relay scenarios.

mod given;
mod then;
mod when;
pub mod world;

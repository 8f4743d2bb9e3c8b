//! Adapter implementations of the relay ports.

pub mod http;
pub mod memory;

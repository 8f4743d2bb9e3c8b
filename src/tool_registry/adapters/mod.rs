//! Adapter implementations of the tool-server registry ports.

pub mod memory;

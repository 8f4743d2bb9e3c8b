//! Unit tests for the tool-server registry.

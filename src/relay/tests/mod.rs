//! Unit tests for the relay module.

mod normalizer_tests;

//! Unit tests for the task module.
//!
//! Tests are organised by concern: domain types, the state machine, and
//! scheduling behaviour over the in-memory adapters.

mod domain_tests;

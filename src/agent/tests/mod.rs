//! Unit tests for the agent module.
//!
//! Tests are organised by concern: domain types and validation, then
//! orchestration behaviour over the in-memory adapter.

mod domain_tests;

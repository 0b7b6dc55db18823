//! Unit tests for the message module.
//!
//! Tests are organised by concern: domain types, the generation service,
//! and message processing over the in-memory adapters.

mod processor_tests;

//! Unit tests for the event module.
//!
//! Tests are organised by concern: domain record construction, bus dispatch
//! behaviour, and forwarding to external sinks.

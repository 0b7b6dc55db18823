//! Message and conversation coordination.
//!
//! Messages are immutable utterances grouped into ordered conversations.
//! Processing an inbound user message can drive a generated reply through
//! the generation port. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

//! Task lifecycle and scheduling.
//!
//! Tasks carry a payload of work for an agent and move through a validated
//! state machine from creation to a terminal status. The module follows
//! hexagonal architecture:
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

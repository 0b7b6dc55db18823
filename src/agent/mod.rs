//! Agent lifecycle and task assignment.
//!
//! Agents are the workers of the orchestration core: each carries a kind, a
//! lifecycle status, and a capability set used for task matching. The module
//! follows hexagonal architecture:
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

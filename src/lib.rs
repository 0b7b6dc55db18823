//! Brunel: orchestration core for autonomous agents.
//!
//! This crate provides the coordination logic for a system of autonomous
//! agents executing asynchronous tasks and exchanging conversational
//! messages: lifecycle state machines, capability-based task matching, and a
//! domain event bus that decouples the orchestration flow from everything
//! reacting to it.
//!
//! # Architecture
//!
//! Brunel follows hexagonal architecture principles:
//!
//! - **Domain**: Pure state and transition rules with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for persistence, generation, and
//!   external event sinks
//! - **Adapters**: Concrete implementations of ports (in-memory stores, sink
//!   bridges)
//! - **Services**: Orchestration flows wiring domain, ports, and events
//!   together
//!
//! # Modules
//!
//! - [`event`]: Domain events, the in-process event bus, and external sink
//!   forwarding
//! - [`agent`]: Agent lifecycle and capability-based lookup
//! - [`task`]: Task lifecycle, scheduling, and assignment
//! - [`message`]: Conversation coordination and reply generation

pub mod agent;
pub mod event;
pub mod message;
pub mod task;

#[cfg(test)]
pub(crate) mod test_support;

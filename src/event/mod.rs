//! Domain events and the in-process event bus.
//!
//! Every lifecycle change in the orchestration core is announced as an
//! immutable [`domain::DomainEvent`]. The [`bus::EventBus`] delivers events
//! to registered handlers either immediately (within the publishing call) or
//! deferred (through an internal FIFO queue drained by a background loop).
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The bus itself in [`bus`]

pub mod adapters;
pub mod bus;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;

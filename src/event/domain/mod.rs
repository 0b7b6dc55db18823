//! Domain model for the event stream.
//!
//! Events are immutable notification records describing something that
//! happened to an entity. They are created once, published to the bus, and
//! never updated.

mod envelope;
mod error;
mod ids;
mod kind;

pub use envelope::DomainEvent;
pub use error::ParseEventKindError;
pub use ids::{EventId, SubscriptionId};
pub use kind::EventKind;

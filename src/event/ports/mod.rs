//! Port contracts for event delivery.

pub mod handler;
pub mod sink;

pub use handler::{EventHandler, HandlerError, HandlerResult};
pub use sink::{EventSink, SinkError, SinkResult};

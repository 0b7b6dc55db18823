//! Adapters bridging the bus to external infrastructure.

pub mod forwarder;

pub use forwarder::SinkForwarder;

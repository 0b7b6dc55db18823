//! Orchestration services for the message module.

pub mod generation;
pub mod processor;

pub use generation::GenerationService;
pub use processor::{MessageProcessor, ProcessMessageRequest, ProcessorError, ProcessorResult};

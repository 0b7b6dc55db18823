//! Port contracts for message persistence and reply generation.

pub mod generation;
pub mod repository;

pub use generation::{Completion, ContextEntry, GenerationClient, GenerationError, GenerationResult};
pub use repository::{MessageRepository, MessageRepositoryError, MessageRepositoryResult};

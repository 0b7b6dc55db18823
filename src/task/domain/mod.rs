//! Task domain types.

mod error;
mod ids;
mod kind;
mod status;
mod task;

pub use error::{ParseTaskKindError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use kind::TaskKind;
pub use status::TaskStatus;
pub use task::Task;

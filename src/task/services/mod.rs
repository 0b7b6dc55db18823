//! Orchestration services for the task module.

pub mod scheduler;

pub use scheduler::{CreateTaskRequest, SchedulerError, SchedulerResult, TaskScheduler};

//! Orchestration services for the agent module.

pub mod orchestrator;

pub use orchestrator::{AgentOrchestrator, CreateAgentRequest, OrchestratorError, OrchestratorResult};

//! Event-type tags for the domain event stream.

use super::ParseEventKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying the concrete kind of a domain event.
///
/// Handlers subscribe per kind; the tag is also the basis for external topic
/// keys (lowercased, prefixed by the forwarding adapter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A new agent was registered with the orchestrator.
    AgentCreated,
    /// An agent moved to a different lifecycle status.
    AgentStatusChanged,
    /// A new task entered the system.
    TaskCreated,
    /// A task was bound to an agent.
    TaskAssigned,
    /// A task finished successfully.
    TaskCompleted,
    /// A task finished with an error.
    TaskFailed,
    /// An inbound message was recorded.
    MessageReceived,
    /// A reply to an inbound message was produced.
    MessageProcessed,
    /// A generation request was handed to the provider.
    GenerationRequested,
    /// The generation provider returned a completion.
    GenerationCompleted,
    /// The generation provider failed.
    GenerationFailed,
}

impl EventKind {
    /// Returns the canonical wire tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AgentCreated => "AgentCreated",
            Self::AgentStatusChanged => "AgentStatusChanged",
            Self::TaskCreated => "TaskCreated",
            Self::TaskAssigned => "TaskAssigned",
            Self::TaskCompleted => "TaskCompleted",
            Self::TaskFailed => "TaskFailed",
            Self::MessageReceived => "MessageReceived",
            Self::MessageProcessed => "MessageProcessed",
            Self::GenerationRequested => "GenerationRequested",
            Self::GenerationCompleted => "GenerationCompleted",
            Self::GenerationFailed => "GenerationFailed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EventKind {
    type Error = ParseEventKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "AgentCreated" => Ok(Self::AgentCreated),
            "AgentStatusChanged" => Ok(Self::AgentStatusChanged),
            "TaskCreated" => Ok(Self::TaskCreated),
            "TaskAssigned" => Ok(Self::TaskAssigned),
            "TaskCompleted" => Ok(Self::TaskCompleted),
            "TaskFailed" => Ok(Self::TaskFailed),
            "MessageReceived" => Ok(Self::MessageReceived),
            "MessageProcessed" => Ok(Self::MessageProcessed),
            "GenerationRequested" => Ok(Self::GenerationRequested),
            "GenerationCompleted" => Ok(Self::GenerationCompleted),
            "GenerationFailed" => Ok(Self::GenerationFailed),
            _ => Err(ParseEventKindError(value.to_owned())),
        }
    }
}

//! Agent kind classification.

use super::ParseAgentKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of work an agent is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Produces text through a language-model provider.
    Generation,
    /// Executes scheduled tasks.
    TaskExecutor,
    /// Coordinates other agents.
    Orchestrator,
    /// Answers with retrieval-augmented context.
    RetrievalAugmented,
    /// Handles mixed content types.
    Multimodal,
}

impl AgentKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::TaskExecutor => "task_executor",
            Self::Orchestrator => "orchestrator",
            Self::RetrievalAugmented => "retrieval_augmented",
            Self::Multimodal => "multimodal",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AgentKind {
    type Error = ParseAgentKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "generation" => Ok(Self::Generation),
            "task_executor" => Ok(Self::TaskExecutor),
            "orchestrator" => Ok(Self::Orchestrator),
            "retrieval_augmented" => Ok(Self::RetrievalAugmented),
            "multimodal" => Ok(Self::Multimodal),
            _ => Err(ParseAgentKindError(value.to_owned())),
        }
    }
}

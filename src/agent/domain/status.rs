//! Agent lifecycle status.

use super::ParseAgentStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Registered but not yet started.
    Created,
    /// Running and ready for work.
    Active,
    /// Running with no work in flight.
    Idle,
    /// Occupied with assigned work.
    Busy,
    /// Stopped after an unrecoverable failure.
    Error,
    /// Shut down deliberately.
    Stopped,
}

impl AgentStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Active => "active",
            Self::Idle => "idle",
            Self::Busy => "busy",
            Self::Error => "error",
            Self::Stopped => "stopped",
        }
    }

    /// Returns whether the agent can accept new task assignments.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Active | Self::Idle)
    }

    // Kept out of the TryFrom impl so the `Error` variant cannot collide
    // with the associated `Error` type.
    fn parse(value: &str) -> Result<Self, ParseAgentStatusError> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "active" => Ok(Self::Active),
            "idle" => Ok(Self::Idle),
            "busy" => Ok(Self::Busy),
            "error" => Ok(Self::Error),
            "stopped" => Ok(Self::Stopped),
            _ => Err(ParseAgentStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AgentStatus {
    type Error = ParseAgentStatusError;

    fn try_from(value: &str) -> Result<Self, ParseAgentStatusError> {
        Self::parse(value)
    }
}

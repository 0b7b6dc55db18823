//! Agent domain types.

mod agent;
mod capabilities;
mod error;
mod ids;
mod kind;
mod status;

pub use agent::Agent;
pub use capabilities::CapabilitySet;
pub use error::{ParseAgentKindError, ParseAgentStatusError};
pub use ids::AgentId;
pub use kind::AgentKind;
pub use status::AgentStatus;

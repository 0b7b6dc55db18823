//! Task kind classification.

use super::ParseTaskKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Text generation through a language-model provider.
    Generation,
    /// Retrieval-augmented query answering.
    RetrievalQuery,
    /// Data transformation or analysis.
    DataProcessing,
    /// Mixed content handling.
    Multimodal,
    /// Caller-defined work.
    Custom,
}

impl TaskKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::RetrievalQuery => "retrieval_query",
            Self::DataProcessing => "data_processing",
            Self::Multimodal => "multimodal",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskKind {
    type Error = ParseTaskKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "generation" => Ok(Self::Generation),
            "retrieval_query" => Ok(Self::RetrievalQuery),
            "data_processing" => Ok(Self::DataProcessing),
            "multimodal" => Ok(Self::Multimodal),
            "custom" => Ok(Self::Custom),
            _ => Err(ParseTaskKindError(value.to_owned())),
        }
    }
}

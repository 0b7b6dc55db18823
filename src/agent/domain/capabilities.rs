//! Agent capability metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named capability declarations for an agent.
///
/// Capabilities map a capability name to an arbitrary JSON value so new
/// capability shapes can be declared without code changes. Task matching
/// uses name containment only; the values are opaque to the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(Map<String, Value>);

impl CapabilitySet {
    /// Creates an empty capability set.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Creates a capability set from an existing map.
    #[must_use]
    pub const fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Declares or replaces a capability.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    /// Removes a capability, returning its value when present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Returns whether the named capability is declared.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns whether every required capability name is declared.
    pub fn contains_all<I, S>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        required.into_iter().all(|name| self.has(name.as_ref()))
    }

    /// Returns the number of declared capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no capabilities are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the capability map as a JSON value.
    #[must_use]
    pub fn as_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

//! Unit-of-work correlation
//!
//! An auditor captures a single logical change time for all the entries it
//! produces. `UnitOfWorkId` names that unit so log events and stored audit
//! records from the same transaction can be grouped together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier shared by every audit entry produced within one unit of work
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitOfWorkId(String);

impl UnitOfWorkId {
    /// Generate a new time-ordered id using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an id handed over by the caller's transaction layer
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl Default for UnitOfWorkId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UnitOfWorkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

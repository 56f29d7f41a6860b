//! Value diff output types.

use serde::{Deserialize, Serialize};

/// One leaf property whose rendered value changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyChange {
    /// Dotted path of the leaf
    pub path: String,
    /// Rendered value before the change (`NULL` for null)
    pub original: String,
    /// Rendered value after the change (`NULL` for null)
    pub current: String,
}

/// Result of diffing an original value set against a current one
///
/// `new_value` and `original_value` are the two delimited strings stored in
/// an update entry. Their segments are position-aligned: the i-th segment of
/// each refers to `changes[i].path`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueDiff {
    pub new_value: String,
    pub original_value: String,
    pub changes: Vec<PropertyChange>,
}

impl ValueDiff {
    /// Whether no leaf changed
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changed leaves
    pub fn changed_count(&self) -> usize {
        self.changes.len()
    }

    /// Changed paths in traversal order
    pub fn changed_paths(&self) -> impl Iterator<Item = &str> {
        self.changes.iter().map(|c| c.path.as_str())
    }
}

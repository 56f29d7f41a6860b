use serde::{Deserialize, Serialize};

/// Tracked state of a record as reported by the change-tracking layer
///
/// Only `Added`, `Modified` and `Deleted` describe a mutation; the auditor
/// rejects the other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeState {
    Added,
    Modified,
    Deleted,
    Unchanged,
    Detached,
}

impl std::fmt::Display for ChangeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChangeState::Added => "added",
            ChangeState::Modified => "modified",
            ChangeState::Deleted => "deleted",
            ChangeState::Unchanged => "unchanged",
            ChangeState::Detached => "detached",
        };
        f.write_str(s)
    }
}

/// Which of the two value sets of a change entry to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSide {
    Original,
    Current,
}

impl std::fmt::Display for ValueSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSide::Original => f.write_str("original"),
            ValueSide::Current => f.write_str("current"),
        }
    }
}

/// Entity type identity supplied by the change-tracking layer
///
/// Change trackers often hand out runtime proxies of the mapped entity
/// type. The tracker reports the proxy's own name in `name` and the mapped
/// entity's name in `base`; table lookups always go through
/// [`EntityType::lookup_name`], so a proxy is never looked up directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityType {
    /// Runtime type name as reported by the tracker
    pub name: String,

    /// Mapped entity type name when `name` is a proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

impl EntityType {
    /// A plain, directly mapped entity type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
        }
    }

    /// A proxy type generated over the mapped entity type `base`
    pub fn proxy(name: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: Some(base.into()),
        }
    }

    /// Whether this is a proxy over another type
    pub fn is_proxy(&self) -> bool {
        self.base.is_some()
    }

    /// Name used for storage-location lookups
    pub fn lookup_name(&self) -> &str {
        self.base.as_deref().unwrap_or(&self.name)
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.lookup_name())
    }
}

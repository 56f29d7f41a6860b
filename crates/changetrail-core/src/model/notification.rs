use serde::{Deserialize, Serialize};

use super::entity::{ChangeState, EntityType, ValueSide};
use super::value::{PropertyValue, ValueSet};
use crate::errors::{AuditError, Result};

/// A tracked change handed to the auditor by the change-tracking layer
///
/// Implementors are shared with the auditor through an `Arc` because the
/// record id of an added record is read back after the unit of work commits,
/// when store-generated keys have been written into the current values.
pub trait ChangeEntry: Send + Sync {
    /// Tracked state of the record
    fn state(&self) -> ChangeState;

    /// Entity type of the record
    fn entity_type(&self) -> EntityType;

    /// Property values as loaded, before the change
    fn original_values(&self) -> Option<ValueSet>;

    /// Property values after the change
    fn current_values(&self) -> Option<ValueSet>;

    /// Values for one side of the change
    fn values(&self, side: ValueSide) -> Option<ValueSet> {
        match side {
            ValueSide::Original => self.original_values(),
            ValueSide::Current => self.current_values(),
        }
    }

    /// Read the primary identifier from one side of the change
    ///
    /// # Errors
    ///
    /// Returns `MissingRecordId` if that side has no values, or the key
    /// property is absent, null or composite.
    fn record_id(&self, side: ValueSide, key_property: &str) -> Result<String> {
        self.values(side)
            .as_ref()
            .and_then(|values| values.get(key_property))
            .and_then(PropertyValue::as_text)
            .map(str::to_string)
            .ok_or_else(|| AuditError::MissingRecordId {
                key_property: key_property.to_string(),
                side,
            })
    }
}

/// Plain-value change notification
///
/// The self-contained [`ChangeEntry`] used when the caller already holds the
/// final values, for example when replaying notifications from documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeNotification {
    pub state: ChangeState,
    pub entity: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_values: Option<ValueSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_values: Option<ValueSet>,
}

impl ChangeNotification {
    /// A newly inserted record
    pub fn added(entity: EntityType, current_values: ValueSet) -> Self {
        Self {
            state: ChangeState::Added,
            entity,
            original_values: None,
            current_values: Some(current_values),
        }
    }

    /// An updated record
    pub fn modified(
        entity: EntityType,
        original_values: ValueSet,
        current_values: ValueSet,
    ) -> Self {
        Self {
            state: ChangeState::Modified,
            entity,
            original_values: Some(original_values),
            current_values: Some(current_values),
        }
    }

    /// A deleted record
    pub fn deleted(entity: EntityType, original_values: ValueSet) -> Self {
        Self {
            state: ChangeState::Deleted,
            entity,
            original_values: Some(original_values),
            current_values: None,
        }
    }

    /// Same notification reported in a different state
    pub fn with_state(mut self, state: ChangeState) -> Self {
        self.state = state;
        self
    }
}

impl ChangeEntry for ChangeNotification {
    fn state(&self) -> ChangeState {
        self.state
    }

    fn entity_type(&self) -> EntityType {
        self.entity.clone()
    }

    fn original_values(&self) -> Option<ValueSet> {
        self.original_values.clone()
    }

    fn current_values(&self) -> Option<ValueSet> {
        self.current_values.clone()
    }
}

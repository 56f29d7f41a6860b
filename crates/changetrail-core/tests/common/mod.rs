#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use changetrail_core::errors::AuditError;
use changetrail_core::model::{ChangeEntry, ChangeState, EntityType, ValueSet};
use changetrail_core::{Auditor, MappedTableResolver, TableMapping};
use serde_json::Value;

/// Build a value set from a JSON object literal
pub fn values(json: Value) -> ValueSet {
    ValueSet::from_json(&json).expect("test values must be a JSON object")
}

/// Auditor with a small fixed table map
pub fn auditor() -> Auditor {
    let resolver = MappedTableResolver::default()
        .with_mapping(TableMapping::new("Customer", "sales", "Customers"))
        .with_mapping(TableMapping::new("Order", "sales", "Orders"));
    Auditor::new(resolver)
}

/// Change entry whose current values can be rewritten after auditing,
/// the way a store fills in generated keys on commit
pub struct TrackedEntry {
    state: ChangeState,
    entity: EntityType,
    original: Option<ValueSet>,
    current: RwLock<Option<ValueSet>>,
}

impl TrackedEntry {
    pub fn added(entity: EntityType, current: ValueSet) -> Arc<Self> {
        Arc::new(Self {
            state: ChangeState::Added,
            entity,
            original: None,
            current: RwLock::new(Some(current)),
        })
    }

    /// Simulate commit: replace the current values
    pub fn commit(&self, current: ValueSet) {
        *self.current.write().unwrap() = Some(current);
    }
}

impl ChangeEntry for TrackedEntry {
    fn state(&self) -> ChangeState {
        self.state
    }

    fn entity_type(&self) -> EntityType {
        self.entity.clone()
    }

    fn original_values(&self) -> Option<ValueSet> {
        self.original.clone()
    }

    fn current_values(&self) -> Option<ValueSet> {
        self.current.read().unwrap().clone()
    }
}

pub fn assert_missing_record_id(err: &AuditError) {
    assert!(
        matches!(err, AuditError::MissingRecordId { .. }),
        "expected MissingRecordId, got {:?}",
        err
    );
}

/// Scenario 1: Audit a Created Record
///
/// Covers the create handler: full serialization of current values, no
/// original value, and a record id read back after commit.
mod common;

use std::sync::Arc;

use changetrail_core::model::{ChangeNotification, EntityType, RecordId};
use changetrail_core::AuditOperation;
use common::{assert_missing_record_id, auditor, values, TrackedEntry};
use serde_json::json;

#[test]
fn test_scenario_01_create_serializes_all_current_values() {
    // GIVEN a new customer with a nested address
    let entry = Arc::new(ChangeNotification::added(
        EntityType::new("Customer"),
        values(json!({"Name": "Alice", "Address": {"City": "NYC"}})),
    ));

    // WHEN auditing the change
    let audit = auditor()
        .record_change(&entry, "alice")
        .expect("Should audit create");

    // THEN every leaf is serialized under its dotted path
    assert_eq!(audit.operation(), AuditOperation::Create);
    assert_eq!(audit.new_value(), Some("[Name]=Alice || [Address.City]=NYC"));

    // AND there is no original value
    assert_eq!(audit.original_value(), None);

    // AND the table comes from the resolver
    assert_eq!(audit.table_name(), "sales.Customers");
    assert_eq!(audit.user_token(), "alice");
}

#[test]
fn test_scenario_01_create_record_id_is_read_after_commit() {
    // GIVEN a new customer whose key is generated by the store
    let entry = TrackedEntry::added(
        EntityType::new("Customer"),
        values(json!({"Id": null, "Name": "Alice"})),
    );

    // WHEN auditing before commit
    let audit = auditor()
        .record_change(&entry, "alice")
        .expect("Should audit create");

    // THEN the record id is pending
    assert!(audit.record_id().is_pending());
    assert!(matches!(audit.record_id(), RecordId::Pending(_)));

    // AND the serialized value shows the key as it was at audit time
    assert_eq!(audit.new_value(), Some("[Id]=NULL || [Name]=Alice"));

    // AND resolving it now fails
    let err = audit.resolve_record_id().unwrap_err();
    assert_missing_record_id(&err);

    // WHEN the store commits and assigns the key
    entry.commit(values(json!({"Id": 42, "Name": "Alice"})));

    // THEN the pending id resolves to the generated key
    assert_eq!(audit.resolve_record_id().unwrap(), "42");

    // AND the storable record carries it
    let record = audit.into_record().expect("Should resolve record");
    assert_eq!(record.record_id, "42");
    assert_eq!(record.operation, AuditOperation::Create);
    assert_eq!(record.new_value.as_deref(), Some("[Id]=NULL || [Name]=Alice"));
    assert_eq!(record.original_value, None);
}

#[test]
fn test_scenario_01_create_with_empty_values() {
    // GIVEN a new record with no properties
    let entry = Arc::new(ChangeNotification::added(
        EntityType::new("Customer"),
        values(json!({})),
    ));

    // WHEN auditing the change
    let audit = auditor().record_change(&entry, "alice").unwrap();

    // THEN the new value is empty
    assert_eq!(audit.new_value(), Some(""));
}

#[test]
fn test_scenario_01_create_null_leaves_render_null() {
    // GIVEN a new customer with unset properties
    let entry = Arc::new(ChangeNotification::added(
        EntityType::new("Customer"),
        values(json!({"Id": 1, "Email": null, "Address": {"Zip": null}})),
    ));

    // WHEN auditing the change
    let audit = auditor().record_change(&entry, "alice").unwrap();

    // THEN nulls are written as NULL
    assert_eq!(
        audit.new_value(),
        Some("[Id]=1 || [Email]=NULL || [Address.Zip]=NULL")
    );
    assert_eq!(audit.resolve_record_id().unwrap(), "1");
}

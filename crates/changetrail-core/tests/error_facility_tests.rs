use changetrail_core::errors::{AuditError, ExError, ExErrorKind};
use changetrail_core::model::{ChangeState, ValueSide};

#[test]
fn test_invalid_operation_kind_verifiable_by_kind() {
    let err = AuditError::InvalidOperationKind {
        state: ChangeState::Unchanged,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidOperationKind);
    assert_eq!(ex_err.code(), "ERR_INVALID_OPERATION_KIND");
    assert_eq!(ex_err.op(), Some("record_change"));
    assert!(ex_err.message().contains("unchanged"));
}

#[test]
fn test_shape_mismatch_carries_path() {
    let err = AuditError::mismatched_shape("Address.Geo", "property missing from current values");

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MismatchedValueShape);
    assert_eq!(ex_err.code(), "ERR_MISMATCHED_VALUE_SHAPE");
    assert_eq!(ex_err.path(), Some("Address.Geo"));
}

#[test]
fn test_missing_record_id_names_key_and_side() {
    let err = AuditError::MissingRecordId {
        key_property: "CustomerId".to_string(),
        side: ValueSide::Current,
    };
    assert!(err.to_string().contains("CustomerId"));
    assert!(err.to_string().contains("current"));

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::MissingRecordId);
    assert_eq!(ex_err.path(), Some("CustomerId"));
}

#[test]
fn test_config_and_value_set_errors_are_distinct() {
    let config: ExError = AuditError::InvalidConfig {
        reason: "bad".to_string(),
    }
    .into();
    let values: ExError = AuditError::InvalidValueSet {
        reason: "bad".to_string(),
    }
    .into();

    assert_ne!(config.kind(), values.kind());
    assert_eq!(config.code(), "ERR_INVALID_CONFIG");
    assert_eq!(values.code(), "ERR_INVALID_VALUE_SET");
}

#[test]
fn test_serde_json_error_converts_to_serialization() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: AuditError = json_err.into();

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::Serialization);
}

#[test]
fn test_display_has_code_prefix() {
    let ex_err: ExError = AuditError::mismatched_shape("Name", "nested in original values").into();
    let text = ex_err.to_string();

    assert!(text.starts_with("[ERR_MISMATCHED_VALUE_SHAPE]"));
    assert!(text.contains("Name"));
}

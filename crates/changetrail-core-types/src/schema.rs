//! Canonical schema constants for structured logging and events
//!
//! These constants keep the field names emitted by the auditor consistent
//! across log events and error reports.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_UNIT_OF_WORK: &str = "unit_of_work";

// Audit entry identifiers
pub const FIELD_ENTRY_ID: &str = "entry_id";
pub const FIELD_TABLE_NAME: &str = "table_name";
pub const FIELD_OPERATION: &str = "operation";
pub const FIELD_RECORD_ID: &str = "record_id";
pub const FIELD_USER: &str = "user";

// Diff sizes
pub const FIELD_CHANGED_COUNT: &str = "changed_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

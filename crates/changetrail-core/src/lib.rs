//! changetrail core - audit-trail generation for data-store mutations
//!
//! This crate turns change notifications into audit-log entries:
//! - Change entry and value-set models with nested properties
//! - Value serialization into `[path]=value || ...` strings
//! - Structural diffing of original and current values
//! - Table-name resolution for entity types, including proxy types
//! - The [`Auditor`], which dispatches each change to its create, update or
//!   delete handler
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use changetrail_core::{Auditor, AuditOperation, ChangeNotification, EntityType, ValueSet};
//!
//! let auditor = Auditor::new(|entity: &str| format!("dbo.{}", entity));
//! let original = ValueSet::builder().leaf("Id", "7").leaf("Age", "30").build().unwrap();
//! let current = ValueSet::builder().leaf("Id", "7").leaf("Age", "31").build().unwrap();
//! let change = Arc::new(ChangeNotification::modified(
//!     EntityType::new("Customer"),
//!     original,
//!     current,
//! ));
//!
//! let entry = auditor.record_change(&change, "alice").unwrap();
//! assert_eq!(entry.operation(), AuditOperation::Update);
//! assert_eq!(entry.table_name(), "dbo.Customer");
//! assert_eq!(entry.new_value(), Some("[Age]=31"));
//! assert_eq!(entry.original_value(), Some("[Age]=30"));
//! ```

pub mod auditor;
pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod render;
pub mod resolver;

#[doc(hidden)]
pub use changetrail_core_types as core_types;

// Re-export commonly used types
pub use auditor::Auditor;
pub use config::AuditorConfig;
pub use diff::{diff_values, ValueDiff};
pub use errors::{AuditError, ExError, ExErrorKind, Result};
pub use model::{
    AuditLogEntry, AuditOperation, AuditRecord, ChangeEntry, ChangeNotification, ChangeState,
    EntityType, PropertyValue, RecordId, ValueSet, ValueSide,
};
pub use render::serialize_values;
pub use resolver::{MappedTableResolver, TableMapping, TableNameResolver};

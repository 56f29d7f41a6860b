pub mod entity;
pub mod entry;
pub mod notification;
pub mod value;

pub use entity::{ChangeState, EntityType, ValueSide};
pub use entry::{AuditBase, AuditLogEntry, AuditOperation, AuditRecord, PendingRecordId, RecordId};
pub use notification::{ChangeEntry, ChangeNotification};
pub use value::{PropertyValue, ValueSet, ValueSetBuilder, PATH_SEPARATOR};

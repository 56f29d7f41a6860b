use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::Result;

/// Operation recorded in an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditOperation {
    #[serde(rename = "C")]
    Create,
    #[serde(rename = "U")]
    Update,
    #[serde(rename = "D")]
    Delete,
}

impl AuditOperation {
    /// Single-letter code stored in the audit log
    pub fn code(&self) -> &'static str {
        match self {
            AuditOperation::Create => "C",
            AuditOperation::Update => "U",
            AuditOperation::Delete => "D",
        }
    }
}

impl std::fmt::Display for AuditOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

type ResolveFn = dyn Fn() -> Result<String> + Send + Sync;

/// Deferred record-id lookup for a freshly inserted record
///
/// Store-generated keys only exist once the unit of work has committed, so
/// the create handler hands back this callable instead of a value. Call
/// [`PendingRecordId::resolve`] after commit.
#[derive(Clone)]
pub struct PendingRecordId(Arc<ResolveFn>);

impl PendingRecordId {
    pub fn new<F>(resolve: F) -> Self
    where
        F: Fn() -> Result<String> + Send + Sync + 'static,
    {
        Self(Arc::new(resolve))
    }

    /// Read the record id now
    ///
    /// # Errors
    ///
    /// Propagates the lookup error, typically `MissingRecordId` when called
    /// before the key has been materialized.
    pub fn resolve(&self) -> Result<String> {
        (self.0)()
    }
}

impl std::fmt::Debug for PendingRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PendingRecordId(..)")
    }
}

/// Record id of an audit entry, known now or after commit
#[derive(Debug, Clone)]
pub enum RecordId {
    Resolved(String),
    Pending(PendingRecordId),
}

impl RecordId {
    /// Whether the id still has to be read after commit
    pub fn is_pending(&self) -> bool {
        matches!(self, RecordId::Pending(_))
    }

    /// The id, if it was known when the entry was built
    pub fn as_resolved(&self) -> Option<&str> {
        match self {
            RecordId::Resolved(id) => Some(id),
            RecordId::Pending(_) => None,
        }
    }

    /// Resolve the id, invoking the pending lookup if needed
    ///
    /// # Errors
    ///
    /// Propagates the error of a pending lookup.
    pub fn resolve(&self) -> Result<String> {
        match self {
            RecordId::Resolved(id) => Ok(id.clone()),
            RecordId::Pending(pending) => pending.resolve(),
        }
    }
}

/// Fields shared by every audit entry, filled before the operation is known
#[derive(Debug, Clone, PartialEq)]
pub struct AuditBase {
    pub id: Uuid,
    pub user_token: String,
    pub timestamp: DateTime<Utc>,
    pub table_name: String,
}

/// One audit-trail entry describing a single record mutation
///
/// Immutable once built. Convert it with [`AuditLogEntry::into_record`] to
/// obtain the storable form; that resolves a pending record id, so do it
/// after the unit of work has committed.
#[derive(Debug, Clone)]
pub struct AuditLogEntry {
    base: AuditBase,
    operation: AuditOperation,
    record_id: RecordId,
    original_value: Option<String>,
    new_value: Option<String>,
}

impl AuditLogEntry {
    pub(crate) fn new(
        base: AuditBase,
        operation: AuditOperation,
        record_id: RecordId,
        original_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            base,
            operation,
            record_id,
            original_value,
            new_value,
        }
    }

    pub fn id(&self) -> Uuid {
        self.base.id
    }

    pub fn user_token(&self) -> &str {
        &self.base.user_token
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.base.timestamp
    }

    /// `"<schema>.<table>"`, or empty when the entity type is unmapped
    pub fn table_name(&self) -> &str {
        &self.base.table_name
    }

    pub fn operation(&self) -> AuditOperation {
        self.operation
    }

    pub fn record_id(&self) -> &RecordId {
        &self.record_id
    }

    /// Serialized pre-change values; `None` for creates
    pub fn original_value(&self) -> Option<&str> {
        self.original_value.as_deref()
    }

    /// Serialized post-change values; `None` for deletes
    pub fn new_value(&self) -> Option<&str> {
        self.new_value.as_deref()
    }

    /// Resolve the record id, invoking the pending lookup for creates
    ///
    /// # Errors
    ///
    /// Propagates the error of a pending lookup.
    pub fn resolve_record_id(&self) -> Result<String> {
        self.record_id.resolve()
    }

    /// Produce the storable record
    ///
    /// # Errors
    ///
    /// Fails if the record id cannot be resolved yet.
    pub fn into_record(self) -> Result<AuditRecord> {
        let record_id = self.record_id.resolve()?;
        Ok(AuditRecord {
            id: self.base.id,
            user_token: self.base.user_token,
            timestamp: self.base.timestamp,
            table_name: self.base.table_name,
            operation: self.operation,
            record_id,
            original_value: self.original_value,
            new_value: self.new_value,
        })
    }
}

/// Fully resolved audit entry, ready for durable storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub user_token: String,
    pub timestamp: DateTime<Utc>,
    pub table_name: String,
    pub operation: AuditOperation,
    pub record_id: String,
    pub original_value: Option<String>,
    pub new_value: Option<String>,
}

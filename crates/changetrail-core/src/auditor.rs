//! The auditor: turns change entries into audit-log entries.
//!
//! One [`Auditor`] serves one unit of work. It fixes the capture timestamp
//! when it is built, so every entry produced for the same unit of work
//! carries the same time. Build a fresh auditor per transaction.
//!
//! ## Logging Ownership
//!
//! `record_change` owns lifecycle logging for auditing:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The user token is only ever logged redacted.

use std::sync::Arc;
use std::time::Instant;

use changetrail_core_types::{Sensitive, UnitOfWorkId};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::{AuditorConfig, DEFAULT_KEY_PROPERTY};
use crate::diff::diff_values;
use crate::errors::{AuditError, Result};
use crate::model::{
    AuditBase, AuditLogEntry, AuditOperation, ChangeEntry, ChangeState, PendingRecordId,
    RecordId, ValueSide,
};
use crate::render::serialize_values;
use crate::resolver::TableNameResolver;
use crate::{log_op_end, log_op_error, log_op_start};

/// Produces audit-log entries for the changes of one unit of work
#[derive(Clone)]
pub struct Auditor {
    change_time: DateTime<Utc>,
    unit_of_work: UnitOfWorkId,
    resolver: Arc<dyn TableNameResolver>,
    key_property: String,
}

impl Auditor {
    /// Auditor stamped with the current time, reading record ids from `Id`
    pub fn new(resolver: impl TableNameResolver + 'static) -> Self {
        Self::with_shared_resolver(Arc::new(resolver))
    }

    /// Auditor over a resolver shared with other auditors
    pub fn with_shared_resolver(resolver: Arc<dyn TableNameResolver>) -> Self {
        Self {
            change_time: Utc::now(),
            unit_of_work: UnitOfWorkId::new(),
            resolver,
            key_property: DEFAULT_KEY_PROPERTY.to_string(),
        }
    }

    /// Auditor using the configured key property and table mappings
    pub fn from_config(config: &AuditorConfig) -> Self {
        Self::new(config.table_resolver()).with_key_property(config.key_property.clone())
    }

    /// Read record ids from `key_property` instead of `Id`
    pub fn with_key_property(mut self, key_property: impl Into<String>) -> Self {
        self.key_property = key_property.into();
        self
    }

    /// Stamp entries with a fixed time
    pub fn with_change_time(mut self, change_time: DateTime<Utc>) -> Self {
        self.change_time = change_time;
        self
    }

    /// Tag log events with a caller-supplied unit-of-work id
    pub fn with_unit_of_work(mut self, unit_of_work: UnitOfWorkId) -> Self {
        self.unit_of_work = unit_of_work;
        self
    }

    pub fn change_time(&self) -> DateTime<Utc> {
        self.change_time
    }

    pub fn unit_of_work(&self) -> &UnitOfWorkId {
        &self.unit_of_work
    }

    pub fn key_property(&self) -> &str {
        &self.key_property
    }

    /// Fields common to every entry: fresh id, user, shared timestamp and
    /// the table the entity type is stored in
    ///
    /// Proxy types are resolved through their base type.
    pub fn build_base<E>(&self, entry: &E, user_token: &str) -> AuditBase
    where
        E: ChangeEntry + ?Sized,
    {
        let entity = entry.entity_type();
        AuditBase {
            id: Uuid::now_v7(),
            user_token: user_token.to_string(),
            timestamp: self.change_time,
            table_name: self.resolver.resolve(entity.lookup_name()),
        }
    }

    /// Build the audit entry for one change
    ///
    /// The entry is shared as an `Arc` because a create entry keeps it to
    /// read the record id after commit.
    ///
    /// # Errors
    ///
    /// - `InvalidOperationKind`: the entry is unchanged or detached
    /// - `MissingRecordId`: an update or delete has no usable key in its
    ///   original values
    /// - `MismatchedValueShape`: an update's value sets differ in structure
    /// - `InvalidValueSet`: a create or delete carries no values to record
    pub fn record_change<E>(&self, entry: &Arc<E>, user_token: &str) -> Result<AuditLogEntry>
    where
        E: ChangeEntry + ?Sized + 'static,
    {
        let state = entry.state();
        log_op_start!(
            "record_change",
            unit_of_work = self.unit_of_work.as_str(),
            state = %state,
            user = %Sensitive::new(user_token)
        );
        let start = Instant::now();

        let result = self.dispatch(entry, user_token).map_err(|e| {
            log_op_error!(
                "record_change",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                unit_of_work = self.unit_of_work.as_str()
            );
            e
        })?;

        log_op_end!(
            "record_change",
            duration_ms = start.elapsed().as_millis() as u64,
            unit_of_work = self.unit_of_work.as_str(),
            entry_id = %result.id(),
            table_name = result.table_name(),
            operation = result.operation().code()
        );

        Ok(result)
    }

    /// Audit every change of a unit of work, in order
    ///
    /// All entries share this auditor's timestamp.
    ///
    /// # Errors
    ///
    /// Stops at the first change that fails, returning its error.
    pub fn record_changes<'a, E, I>(
        &self,
        entries: I,
        user_token: &str,
    ) -> Result<Vec<AuditLogEntry>>
    where
        E: ChangeEntry + ?Sized + 'static,
        I: IntoIterator<Item = &'a Arc<E>>,
    {
        entries
            .into_iter()
            .map(|entry| self.record_change(entry, user_token))
            .collect()
    }

    fn dispatch<E>(&self, entry: &Arc<E>, user_token: &str) -> Result<AuditLogEntry>
    where
        E: ChangeEntry + ?Sized + 'static,
    {
        match entry.state() {
            ChangeState::Added => self.added(entry, user_token),
            ChangeState::Modified => self.modified(&**entry, user_token),
            ChangeState::Deleted => self.deleted(&**entry, user_token),
            state @ (ChangeState::Unchanged | ChangeState::Detached) => {
                Err(AuditError::InvalidOperationKind { state })
            }
        }
    }

    fn added<E>(&self, entry: &Arc<E>, user_token: &str) -> Result<AuditLogEntry>
    where
        E: ChangeEntry + ?Sized + 'static,
    {
        let current = entry
            .current_values()
            .ok_or_else(|| AuditError::InvalidValueSet {
                reason: "added entry has no current values".to_string(),
            })?;

        let pending = {
            let entry = Arc::clone(entry);
            let key_property = self.key_property.clone();
            PendingRecordId::new(move || entry.record_id(ValueSide::Current, &key_property))
        };

        Ok(AuditLogEntry::new(
            self.build_base(&**entry, user_token),
            AuditOperation::Create,
            RecordId::Pending(pending),
            None,
            Some(serialize_values(&current)),
        ))
    }

    fn modified<E>(&self, entry: &E, user_token: &str) -> Result<AuditLogEntry>
    where
        E: ChangeEntry + ?Sized,
    {
        let record_id = entry.record_id(ValueSide::Original, &self.key_property)?;
        let original = entry
            .original_values()
            .ok_or_else(|| AuditError::mismatched_shape("", "original values missing"))?;
        let current = entry
            .current_values()
            .ok_or_else(|| AuditError::mismatched_shape("", "current values missing"))?;

        let diff = diff_values(&original, &current)?;
        tracing::debug!(
            record_id = record_id.as_str(),
            changed_count = diff.changed_count(),
            "diffed modified entry"
        );

        Ok(AuditLogEntry::new(
            self.build_base(entry, user_token),
            AuditOperation::Update,
            RecordId::Resolved(record_id),
            Some(diff.original_value),
            Some(diff.new_value),
        ))
    }

    fn deleted<E>(&self, entry: &E, user_token: &str) -> Result<AuditLogEntry>
    where
        E: ChangeEntry + ?Sized,
    {
        let record_id = entry.record_id(ValueSide::Original, &self.key_property)?;
        let original = entry
            .original_values()
            .ok_or_else(|| AuditError::InvalidValueSet {
                reason: "deleted entry has no original values".to_string(),
            })?;

        Ok(AuditLogEntry::new(
            self.build_base(entry, user_token),
            AuditOperation::Delete,
            RecordId::Resolved(record_id),
            Some(serialize_values(&original)),
            None,
        ))
    }
}

impl std::fmt::Debug for Auditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auditor")
            .field("change_time", &self.change_time)
            .field("unit_of_work", &self.unit_of_work)
            .field("key_property", &self.key_property)
            .finish_non_exhaustive()
    }
}

//! Operation lifecycle macros
//!
//! An audited operation emits one `start` event and then either one `end`
//! or one `end_error` event. Extra fields follow the mandatory ones using
//! the usual `tracing` field syntax.

/// Emit the `start` event of `op`
///
/// ```
/// # use changetrail_core::log_op_start;
/// log_op_start!("record_change");
/// log_op_start!("record_change", unit_of_work = "uow-1", state = "added");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START
            $(, $($field)+)?
        )
    };
}

/// Emit the `end` event of `op` with its elapsed milliseconds
///
/// ```
/// # use changetrail_core::log_op_end;
/// log_op_end!("record_change", duration_ms = 3, table_name = "dbo.Customer");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)+)?
        )
    };
}

/// Emit the `end_error` event of `op`, tagged with the error's stable kind
/// and code
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError).
///
/// ```
/// # use changetrail_core::log_op_error;
/// # use changetrail_core::errors::AuditError;
/// let err = AuditError::mismatched_shape("Address.City", "missing");
/// log_op_error!("record_change", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex: $crate::errors::ExError = ::core::convert::Into::into($err);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex.kind(),
            err.code = ex.code()
            $(, $($field)+)?
        )
    }};
}

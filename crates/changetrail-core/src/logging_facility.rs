//! Structured logging for the auditor
//!
//! - [`init`] installs the process subscriber for a [`Profile`]
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` emit the lifecycle
//!   events of an operation with the canonical fields of
//!   `changetrail_core_types::schema`
//! - [`test_capture`] records events in memory for assertions
//!
//! ```rust
//! use changetrail_core::logging_facility::{init, Profile};
//!
//! init(Profile::Production);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

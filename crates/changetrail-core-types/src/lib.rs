//! Core types shared across changetrail facilities
//!
//! This crate provides foundational types used by both the error and
//! logging facilities of `changetrail-core`:
//!
//! - **Unit of work**: `UnitOfWorkId` correlating every audit entry captured
//!   by one auditor instance
//! - **Sensitive data**: `Sensitive<T>` marker for automatic redaction of
//!   user tokens
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod sensitive;
pub mod unit_of_work;

pub use sensitive::Sensitive;
pub use unit_of_work::UnitOfWorkId;

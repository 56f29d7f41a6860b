//! Value diff engine.
//!
//! Compares the original and current value sets of a modified record and
//! produces the two position-aligned strings stored in an update entry.
//!
//! ## Entry point
//!
//! ```
//! use changetrail_core::diff::diff_values;
//! use changetrail_core::model::ValueSet;
//!
//! let before = ValueSet::builder().leaf("Name", "Bob").leaf("Age", "30").build().unwrap();
//! let after = ValueSet::builder().leaf("Name", "Bob").leaf("Age", "31").build().unwrap();
//!
//! let diff = diff_values(&before, &after).unwrap();
//! assert_eq!(diff.new_value, "[Age]=31");
//! assert_eq!(diff.original_value, "[Age]=30");
//! ```
//!
//! ## Guarantees
//!
//! - **Selectivity**: only leaves whose rendered text differs are emitted.
//! - **Alignment**: the i-th segment of `new_value` and of `original_value`
//!   name the same dotted path.
//! - **Shape checking**: structural disagreement between the two sets is an
//!   error, never a silently misaligned pair of strings.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::diff_values;
pub use human_summary::render_human_summary;
pub use model::{PropertyChange, ValueDiff};

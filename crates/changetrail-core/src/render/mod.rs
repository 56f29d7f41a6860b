//! Textual rendering of value sets for audit entries.

pub mod segment;
pub mod values;

pub use segment::{split_segments, NULL_TOKEN, SEGMENT_SEPARATOR};
pub use values::serialize_values;

//! Value diff computation engine.
//!
//! The entry point is [`diff_values`], which walks the original value set,
//! descends into nested sets on both sides in lockstep and records every
//! leaf whose rendered text differs.

use crate::diff::model::{PropertyChange, ValueDiff};
use crate::errors::{AuditError, Result};
use crate::model::{PropertyValue, ValueSet};
use crate::render::segment::{join_path, leaf_text, push_segment, strip_trailing_separator};

/// Diff two value sets describing the same record before and after a change
///
/// Both sets must have the same shape: the same property names at every
/// level, with composites on one side matched by composites on the other.
/// Leaves are compared by their rendered text, so values that render
/// identically count as unchanged.
///
/// # Errors
///
/// - `MismatchedValueShape`: a property exists on one side only, or is a
///   nested set on one side and a leaf on the other
pub fn diff_values(original: &ValueSet, current: &ValueSet) -> Result<ValueDiff> {
    let mut diff = ValueDiff::default();
    walk(original, current, None, &mut diff)?;
    strip_trailing_separator(&mut diff.new_value);
    strip_trailing_separator(&mut diff.original_value);
    Ok(diff)
}

fn walk(
    original: &ValueSet,
    current: &ValueSet,
    prefix: Option<&str>,
    diff: &mut ValueDiff,
) -> Result<()> {
    for (name, original_value) in original.iter() {
        let path = join_path(prefix, name);
        let current_value = current.get(name).ok_or_else(|| {
            AuditError::mismatched_shape(&path, "property missing from current values")
        })?;

        match (original_value, current_value) {
            (PropertyValue::Composite(orig_inner), PropertyValue::Composite(cur_inner)) => {
                walk(orig_inner, cur_inner, Some(&path), diff)?;
            }
            (PropertyValue::Leaf(orig), PropertyValue::Leaf(cur)) => {
                let (orig_text, cur_text) = (leaf_text(orig), leaf_text(cur));
                if orig_text != cur_text {
                    push_segment(&mut diff.new_value, &path, cur_text);
                    push_segment(&mut diff.original_value, &path, orig_text);
                    diff.changes.push(PropertyChange {
                        path,
                        original: orig_text.to_string(),
                        current: cur_text.to_string(),
                    });
                }
            }
            (PropertyValue::Composite(_), PropertyValue::Leaf(_)) => {
                return Err(AuditError::mismatched_shape(
                    path,
                    "nested in original values but a leaf in current values",
                ));
            }
            (PropertyValue::Leaf(_), PropertyValue::Composite(_)) => {
                return Err(AuditError::mismatched_shape(
                    path,
                    "a leaf in original values but nested in current values",
                ));
            }
        }
    }

    if let Some(extra) = current.names().find(|name| !original.contains(name)) {
        return Err(AuditError::mismatched_shape(
            join_path(prefix, extra),
            "property missing from original values",
        ));
    }

    Ok(())
}

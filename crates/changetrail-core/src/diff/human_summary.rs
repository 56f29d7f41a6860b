//! Human-readable summary renderer for value diffs.

use crate::diff::model::ValueDiff;

/// Render a plain-text summary of a [`ValueDiff`], one changed path per line.
///
/// Intended for review output; audit entries store the delimited strings,
/// not this summary.
pub fn render_human_summary(diff: &ValueDiff) -> String {
    if diff.is_unchanged() {
        return "No changes.\n".to_string();
    }

    let mut out = format!(
        "{} propert{} changed:\n",
        diff.changed_count(),
        if diff.changed_count() == 1 { "y" } else { "ies" }
    );
    for change in &diff.changes {
        out.push_str(&format!(
            "  {}: {} -> {}\n",
            change.path, change.original, change.current
        ));
    }
    out
}

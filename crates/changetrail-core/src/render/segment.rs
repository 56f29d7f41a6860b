//! Segment formatting shared by the value serializer and the diff engine.
//!
//! A serialized value set is a list of `[path]=value` segments joined by
//! [`SEGMENT_SEPARATOR`]. Buffers are built by appending a segment plus a
//! separator for every leaf, then stripping the final separator once.

use std::fmt::Write as _;

use crate::model::PATH_SEPARATOR;

/// Separator between two segments
pub const SEGMENT_SEPARATOR: &str = " || ";

/// Text written for null leaves
pub const NULL_TOKEN: &str = "NULL";

/// Extend a dotted path with one property name
pub(crate) fn join_path(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}{}{}", prefix, PATH_SEPARATOR, name),
        _ => name.to_string(),
    }
}

/// Text of a leaf value, `NULL` when absent
pub(crate) fn leaf_text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NULL_TOKEN)
}

/// Append `[path]=value || ` to the buffer
pub(crate) fn push_segment(buf: &mut String, path: &str, value: &str) {
    // Writing to a String cannot fail.
    let _ = write!(buf, "[{}]={}{}", path, value, SEGMENT_SEPARATOR);
}

/// Drop the separator left after the last segment
pub(crate) fn strip_trailing_separator(buf: &mut String) {
    if buf.ends_with(SEGMENT_SEPARATOR) {
        buf.truncate(buf.len() - SEGMENT_SEPARATOR.len());
    }
}

/// Split a serialized string back into its `(path, value)` segments
///
/// Intended for inspecting audit output. Values that themselves contain the
/// separator are not recoverable.
pub fn split_segments(serialized: &str) -> Vec<(&str, &str)> {
    if serialized.is_empty() {
        return Vec::new();
    }
    serialized
        .split(SEGMENT_SEPARATOR)
        .filter_map(|segment| {
            let rest = segment.strip_prefix('[')?;
            let (path, value) = rest.split_once("]=")?;
            Some((path, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(None, "Name"), "Name");
        assert_eq!(join_path(Some(""), "Name"), "Name");
        assert_eq!(join_path(Some("Address"), "City"), "Address.City");
        assert_eq!(join_path(Some("A.B"), "C"), "A.B.C");
    }

    #[test]
    fn test_push_and_strip() {
        let mut buf = String::new();
        push_segment(&mut buf, "Name", "Alice");
        push_segment(&mut buf, "Age", NULL_TOKEN);
        assert_eq!(buf, "[Name]=Alice || [Age]=NULL || ");

        strip_trailing_separator(&mut buf);
        assert_eq!(buf, "[Name]=Alice || [Age]=NULL");
    }

    #[test]
    fn test_strip_on_empty_buffer() {
        let mut buf = String::new();
        strip_trailing_separator(&mut buf);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_split_segments() {
        let segments = split_segments("[Name]=Alice || [Address.City]=NYC");
        assert_eq!(segments, vec![("Name", "Alice"), ("Address.City", "NYC")]);
        assert!(split_segments("").is_empty());
    }
}

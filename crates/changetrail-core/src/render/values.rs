use super::segment::{join_path, leaf_text, push_segment, strip_trailing_separator};
use crate::model::{PropertyValue, ValueSet};

/// Serialize every leaf of a value set into one delimited string
///
/// Properties are visited in enumeration order. Nested sets contribute
/// their leaves under a dotted path and emit nothing for themselves. Null
/// leaves are written as `NULL`.
///
/// # Example
///
/// ```
/// use changetrail_core::model::ValueSet;
/// use changetrail_core::render::serialize_values;
///
/// let address = ValueSet::builder().leaf("City", "NYC").build().unwrap();
/// let values = ValueSet::builder()
///     .leaf("Name", "Alice")
///     .composite("Address", address)
///     .build()
///     .unwrap();
///
/// assert_eq!(serialize_values(&values), "[Name]=Alice || [Address.City]=NYC");
/// ```
pub fn serialize_values(values: &ValueSet) -> String {
    let mut buf = String::new();
    serialize_into(values, None, &mut buf);
    strip_trailing_separator(&mut buf);
    buf
}

fn serialize_into(values: &ValueSet, prefix: Option<&str>, buf: &mut String) {
    for (name, value) in values.iter() {
        let path = join_path(prefix, name);
        match value {
            PropertyValue::Composite(inner) => serialize_into(inner, Some(&path), buf),
            PropertyValue::Leaf(text) => push_segment(buf, &path, leaf_text(text)),
        }
    }
}

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::errors::{AuditError, Result};

/// Separator between the segments of a dotted property path
pub const PATH_SEPARATOR: char = '.';

/// A single property value: either a scalar leaf or a nested value set
///
/// Leaves hold the value's textual form, or `None` when the property is
/// null. Composite values model owned sub-objects (complex types) whose
/// properties are audited under a dotted path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Leaf(Option<String>),
    Composite(ValueSet),
}

impl PropertyValue {
    /// A non-null leaf
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(Some(text.into()))
    }

    /// A null leaf
    pub fn null() -> Self {
        Self::Leaf(None)
    }

    /// Whether this value is a nested value set
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }

    /// Text of a non-null leaf
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Leaf(Some(text)) => Some(text),
            _ => None,
        }
    }

    /// Nested value set of a composite
    pub fn as_composite(&self) -> Option<&ValueSet> {
        match self {
            Self::Composite(values) => Some(values),
            Self::Leaf(_) => None,
        }
    }

    /// Convert a JSON value into a property value
    ///
    /// Objects become composites, `null` becomes a null leaf, strings are
    /// kept verbatim, numbers and booleans use their textual form and arrays
    /// are stored as compact JSON text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValueSet` when a nested object has an invalid
    /// property name.
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => Self::Leaf(None),
            Value::String(s) => Self::Leaf(Some(s.clone())),
            Value::Bool(b) => Self::Leaf(Some(b.to_string())),
            Value::Number(n) => Self::Leaf(Some(n.to_string())),
            Value::Array(_) => Self::Leaf(Some(value.to_string())),
            Value::Object(_) => Self::Composite(ValueSet::from_json(value)?),
        })
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Leaf(Some(text)) => Value::String(text.clone()),
            Self::Leaf(None) => Value::Null,
            Self::Composite(values) => values.to_json(),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(text: &str) -> Self {
        Self::leaf(text)
    }
}

impl From<String> for PropertyValue {
    fn from(text: String) -> Self {
        Self::Leaf(Some(text))
    }
}

impl From<Option<String>> for PropertyValue {
    fn from(text: Option<String>) -> Self {
        Self::Leaf(text)
    }
}

impl From<ValueSet> for PropertyValue {
    fn from(values: ValueSet) -> Self {
        Self::Composite(values)
    }
}

/// An ordered set of named property values
///
/// Enumeration order is insertion order, which is the order properties
/// appear in serialized audit output. Names are unique within a set and
/// never contain the path separator, so two distinct leaves can never
/// flatten to the same dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueSet {
    properties: Vec<(String, PropertyValue)>,
}

impl ValueSet {
    /// Create an empty value set
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a value set fluently
    pub fn builder() -> ValueSetBuilder {
        ValueSetBuilder::default()
    }

    /// Append a property
    ///
    /// # Errors
    ///
    /// Returns `InvalidValueSet` if the name is empty, contains the path
    /// separator, or is already present.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(AuditError::InvalidValueSet {
                reason: "property name must not be empty".to_string(),
            });
        }
        if name.contains(PATH_SEPARATOR) {
            return Err(AuditError::InvalidValueSet {
                reason: format!(
                    "property name '{}' must not contain '{}'",
                    name, PATH_SEPARATOR
                ),
            });
        }
        if self.contains(&name) {
            return Err(AuditError::InvalidValueSet {
                reason: format!("duplicate property name '{}'", name),
            });
        }
        self.properties.push((name, value.into()));
        Ok(())
    }

    /// Get a property value by name
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Check if a property exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Property names in enumeration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(n, _)| n.as_str())
    }

    /// Properties in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of top-level properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if the set has no properties
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Number of leaf properties, counting through nested sets
    pub fn leaf_count(&self) -> usize {
        self.properties
            .iter()
            .map(|(_, v)| match v {
                PropertyValue::Leaf(_) => 1,
                PropertyValue::Composite(inner) => inner.leaf_count(),
            })
            .sum()
    }

    /// Build a value set from a JSON object, preserving key order
    ///
    /// # Errors
    ///
    /// Returns `InvalidValueSet` if `value` is not an object or contains an
    /// invalid property name at any depth.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| AuditError::InvalidValueSet {
            reason: format!("expected a JSON object, got: {}", value),
        })?;

        let mut values = Self::new();
        for (name, raw) in object {
            values.insert(name.clone(), PropertyValue::from_json(raw)?)?;
        }
        Ok(values)
    }

    /// Render the set as a JSON object (leaves as strings or null)
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.properties
                .iter()
                .map(|(n, v)| (n.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl Serialize for ValueSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.properties.len()))?;
        for (name, value) in &self.properties {
            map.serialize_entry(name, &value.to_json())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ValueSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        ValueSet::from_json(&raw).map_err(D::Error::custom)
    }
}

/// Fluent builder for [`ValueSet`]
///
/// Errors from invalid names are deferred to [`ValueSetBuilder::build`].
#[derive(Debug, Default)]
pub struct ValueSetBuilder {
    values: ValueSet,
    error: Option<AuditError>,
}

impl ValueSetBuilder {
    /// Add a non-null leaf
    pub fn leaf(self, name: &str, text: impl Into<String>) -> Self {
        self.property(name, PropertyValue::leaf(text))
    }

    /// Add a null leaf
    pub fn null(self, name: &str) -> Self {
        self.property(name, PropertyValue::null())
    }

    /// Add a nested value set
    pub fn composite(self, name: &str, values: ValueSet) -> Self {
        self.property(name, PropertyValue::Composite(values))
    }

    /// Add any property value
    pub fn property(mut self, name: &str, value: PropertyValue) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.values.insert(name, value) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Finish the set
    ///
    /// # Errors
    ///
    /// Returns the first `InvalidValueSet` error hit while adding properties.
    pub fn build(self) -> Result<ValueSet> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.values),
        }
    }
}

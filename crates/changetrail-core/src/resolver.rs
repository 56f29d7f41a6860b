//! Table-name resolution
//!
//! The auditor asks a [`TableNameResolver`] where an entity type is stored.
//! It always passes [`EntityType::lookup_name`](crate::model::EntityType::lookup_name),
//! so resolvers only ever see mapped entity names, never proxy names.

use serde::{Deserialize, Serialize};

/// Maps an entity type name to its `"<schema>.<table>"` storage location
///
/// Unknown entity names resolve to an empty string rather than an error;
/// the auditor stores whatever is returned.
pub trait TableNameResolver: Send + Sync {
    fn resolve(&self, entity_name: &str) -> String;
}

impl<F> TableNameResolver for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn resolve(&self, entity_name: &str) -> String {
        self(entity_name)
    }
}

/// One entity-to-table mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMapping {
    pub entity: String,
    pub schema: String,
    pub table: String,
}

impl TableMapping {
    pub fn new(
        entity: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            entity: entity.into(),
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// `"<schema>.<table>"`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }
}

/// Resolver backed by an in-memory list of mappings
///
/// Entity names match case-insensitively and the first matching mapping
/// wins, mirroring how store metadata containers are searched.
#[derive(Debug, Clone, Default)]
pub struct MappedTableResolver {
    mappings: Vec<TableMapping>,
}

impl MappedTableResolver {
    pub fn new(mappings: Vec<TableMapping>) -> Self {
        Self { mappings }
    }

    /// Add a mapping after the existing ones
    pub fn with_mapping(mut self, mapping: TableMapping) -> Self {
        self.mappings.push(mapping);
        self
    }

    pub fn mappings(&self) -> &[TableMapping] {
        &self.mappings
    }
}

impl TableNameResolver for MappedTableResolver {
    fn resolve(&self, entity_name: &str) -> String {
        self.mappings
            .iter()
            .find(|m| m.entity.eq_ignore_ascii_case(entity_name))
            .map(TableMapping::qualified_name)
            .unwrap_or_default()
    }
}

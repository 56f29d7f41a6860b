//! Auditor configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! key_property = "Id"
//! log_profile = "production"
//!
//! [[tables]]
//! entity = "Customer"
//! schema = "sales"
//! table = "Customers"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{AuditError, Result};
use crate::logging_facility::Profile;
use crate::resolver::{MappedTableResolver, TableMapping};

/// Key property read when no configuration overrides it
pub const DEFAULT_KEY_PROPERTY: &str = "Id";

fn default_key_property() -> String {
    DEFAULT_KEY_PROPERTY.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditorConfig {
    /// Property holding the primary identifier of audited records
    #[serde(default = "default_key_property")]
    pub key_property: String,

    #[serde(default)]
    pub log_profile: Profile,

    #[serde(default)]
    pub tables: Vec<TableMapping>,
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self {
            key_property: default_key_property(),
            log_profile: Profile::default(),
            tables: Vec::new(),
        }
    }
}

impl AuditorConfig {
    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the text is not valid TOML for this
    /// structure or fails validation.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AuditorConfig = toml::from_str(text).map_err(|e| AuditError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| AuditError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            tables = config.tables.len(),
            "loaded auditor config"
        );
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty key property or a table mapping
    /// with an empty field.
    pub fn validate(&self) -> Result<()> {
        if self.key_property.trim().is_empty() {
            return Err(AuditError::InvalidConfig {
                reason: "key_property must not be empty".to_string(),
            });
        }
        for (index, mapping) in self.tables.iter().enumerate() {
            let empty = [
                ("entity", &mapping.entity),
                ("schema", &mapping.schema),
                ("table", &mapping.table),
            ]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty());
            if let Some((field, _)) = empty {
                return Err(AuditError::InvalidConfig {
                    reason: format!("tables[{}].{} must not be empty", index, field),
                });
            }
        }
        Ok(())
    }

    /// Resolver over the configured table mappings, in file order
    pub fn table_resolver(&self) -> MappedTableResolver {
        MappedTableResolver::new(self.tables.clone())
    }
}

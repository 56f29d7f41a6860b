use thiserror::Error;

use crate::model::{ChangeState, ValueSide};

/// Result type alias using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Stable classification of every error the auditor can surface. Each kind
/// maps to a stable error code usable by callers that persist or report
/// audit failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Dispatch
    InvalidOperationKind,

    // Value sets
    MismatchedValueShape,
    InvalidValueSet,
    MissingRecordId,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidOperationKind => "ERR_INVALID_OPERATION_KIND",
            ExErrorKind::MismatchedValueShape => "ERR_MISMATCHED_VALUE_SHAPE",
            ExErrorKind::InvalidValueSet => "ERR_INVALID_VALUE_SET",
            ExErrorKind::MissingRecordId => "ERR_MISSING_RECORD_ID",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification fields needed for programmatic handling plus
/// the context (operation, entity type, property path) needed for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_type: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_type: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity type context
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Add dotted property path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity type context, if any
    pub fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_deref()
    }

    /// Get the dotted property path, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_type) = &self.entity_type {
            write!(f, " (entity_type: {})", entity_type)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for audit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditError {
    /// The change entry is in a state that does not describe a mutation
    #[error("Change state '{state}' is not auditable: expected added, modified or deleted")]
    InvalidOperationKind { state: ChangeState },

    /// Original and current value sets do not have the same structure
    #[error("Value sets differ in shape at '{path}': {reason}")]
    MismatchedValueShape { path: String, reason: String },

    /// The primary key could not be read from the requested value set
    #[error("Record id property '{key_property}' is not available in the {side} values")]
    MissingRecordId {
        key_property: String,
        side: ValueSide,
    },

    /// A value set could not be built (duplicate or malformed property name)
    #[error("Invalid value set: {reason}")]
    InvalidValueSet { reason: String },

    /// Auditor configuration failed to parse or validate
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Serialization error (JSON/TOML encoding or decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O error
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl AuditError {
    /// Shorthand for a shape mismatch at `path`
    pub fn mismatched_shape(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MismatchedValueShape {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a shape mismatch
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::MismatchedValueShape { .. })
    }
}

/// Conversion from AuditError to the canonical ExError
impl From<AuditError> for ExError {
    fn from(err: AuditError) -> Self {
        let message = err.to_string();
        match err {
            AuditError::InvalidOperationKind { .. } => {
                ExError::new(ExErrorKind::InvalidOperationKind)
                    .with_op("record_change")
                    .with_message(message)
            }

            AuditError::MismatchedValueShape { path, .. } => {
                ExError::new(ExErrorKind::MismatchedValueShape)
                    .with_op("diff_values")
                    .with_path(path)
                    .with_message(message)
            }

            AuditError::MissingRecordId { key_property, .. } => {
                ExError::new(ExErrorKind::MissingRecordId)
                    .with_op("record_id")
                    .with_path(key_property)
                    .with_message(message)
            }

            AuditError::InvalidValueSet { .. } => {
                ExError::new(ExErrorKind::InvalidValueSet).with_message(message)
            }

            AuditError::InvalidConfig { .. } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(message),

            AuditError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            AuditError::Io { .. } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::Io {
            message: err.to_string(),
        }
    }
}

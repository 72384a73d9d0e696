//! Error types for the content-type builder
//!
//! The editing store assumes a well-formed action stream, so most of these
//! variants describe caller contract violations (a path that does not exist,
//! an attribute that was never there) rather than user-facing failures.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the content-type builder
#[derive(Debug, Error)]
pub enum BuilderError {
    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Component not found in the component registry
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// Attribute not found on a schema
    #[error("Attribute '{attribute}' not found in schema '{schema}'")]
    AttributeNotFound { schema: String, attribute: String },

    /// The edited document has no data at the requested path
    #[error("Nothing is being edited at '{0}'")]
    EditTargetMissing(String),

    /// Dynamic zone index out of range
    #[error("Index {index} is out of range for dynamic zone '{zone}' ({len} entries)")]
    DynamicZoneIndexOutOfRange {
        zone: String,
        index: usize,
        len: usize,
    },

    // ========================================================================
    // Contract Errors
    // ========================================================================
    /// Attribute exists but is not a dynamic zone
    #[error("Attribute '{0}' is not a dynamic zone")]
    NotADynamicZone(String),

    /// A component was requested to be added without naming it
    #[error("Attribute '{0}' does not reference a component")]
    MissingComponentReference(String),

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A relation attribute breaks a pairing invariant
    #[error("Relation '{schema}.{attribute}' is inconsistent: {message}")]
    RelationValidation {
        schema: String,
        attribute: String,
        message: String,
    },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl BuilderError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        BuilderError::Validation(msg.into())
    }

    /// Create a relation validation error
    pub fn relation_validation(
        schema: impl Into<String>,
        attribute: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        BuilderError::RelationValidation {
            schema: schema.into(),
            attribute: attribute.into(),
            message: msg.into(),
        }
    }

    /// Create an attribute-not-found error
    pub fn attribute_not_found(schema: impl Into<String>, attribute: impl Into<String>) -> Self {
        BuilderError::AttributeNotFound {
            schema: schema.into(),
            attribute: attribute.into(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BuilderError::Validation(_) | BuilderError::RelationValidation { .. }
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BuilderError::ComponentNotFound(_)
                | BuilderError::AttributeNotFound { .. }
                | BuilderError::EditTargetMissing(_)
                | BuilderError::DynamicZoneIndexOutOfRange { .. }
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            BuilderError::Io(_) | BuilderError::FileRead { .. } | BuilderError::FileWrite { .. }
        )
    }
}

/// Result type alias using BuilderError
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> BuilderResult<T>;
}

impl<T, E: Into<BuilderError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> BuilderResult<T> {
        self.map_err(|e| {
            let err: BuilderError = e.into();
            BuilderError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

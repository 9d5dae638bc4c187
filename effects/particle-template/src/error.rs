//! Error handling for template construction and particle generation

use thiserror::Error;

/// Errors that can occur while building a template or generating particles
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A configuration field has a shape the sampler cannot interpret
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the configuration field
        field: &'static str,
        /// Why the field was rejected
        reason: String,
    },

    /// A required configuration field is absent
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// Unknown template kind name
    #[error("Unknown template kind: {0}")]
    UnknownKind(String),

    /// A symbolic reference names a variable that was not evaluated
    #[error("Unresolved variable '{name}' referenced by field '{field}'")]
    UnresolvedVariable {
        /// Name of the field holding the reference
        field: &'static str,
        /// Variable name
        name: String,
    },

    /// A sampled value does not have the shape the field expects
    #[error("Type mismatch for field '{field}': expected {expected}")]
    TypeMismatch {
        /// Name of the field
        field: &'static str,
        /// Expected shape ("scalar", "vector" or "position")
        expected: &'static str,
    },
}

/// Result type using TemplateError
pub type Result<T> = std::result::Result<T, TemplateError>;

impl TemplateError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

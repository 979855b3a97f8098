//! Error types for definition conversion.

use thiserror::Error;

/// Errors that abort the conversion of a single definition file.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A qualified name has no segments or contains an empty segment.
    #[error("invalid qualified name `{name}`")]
    InvalidName { name: String },

    /// A type token matched no primitive, no override and no registry prefix.
    #[error("unresolved type `{token}`")]
    UnresolvedType { token: String },

    /// Two registry entries claim the same token with different results.
    #[error("ambiguous type `{token}`: resolves to both `{first}` and `{second}`")]
    RegistryAmbiguity {
        token: String,
        first: String,
        second: String,
    },

    /// The input document is not a well-formed definition file.
    #[error("malformed definition file: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Short name of the error kind, used in user-facing reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::InvalidName { .. } => "InvalidName",
            ConvertError::UnresolvedType { .. } => "UnresolvedType",
            ConvertError::RegistryAmbiguity { .. } => "RegistryAmbiguity",
            ConvertError::Json(_) => "MalformedInput",
        }
    }
}

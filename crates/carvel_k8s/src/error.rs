//! Error types for manifest queries.

use thiserror::Error;

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Errors that can occur while reading a manifest stream.
///
/// A lookup that finds nothing is not an error; it returns `None`.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot decode {kind} {name}: {message}")]
    Decode {
        kind: String,
        name: String,
        message: String,
    },
}

//! Error types for the ytt adapter.

use thiserror::Error;

/// Result type alias for render operations.
pub type YttResult<T> = Result<T, YttError>;

/// Errors that prevent ytt from running at all.
///
/// A ytt process that runs and exits non-zero is not an error; it is reported
/// through [`RenderOutput::success`](crate::RenderOutput).
#[derive(Error, Debug)]
pub enum YttError {
    #[error("Failed to spawn {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ytt version query failed: {0}")]
    VersionFailed(String),
}

impl YttError {
    /// True when the binary could not be located.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Spawn { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::VersionFailed(_) => false,
        }
    }
}

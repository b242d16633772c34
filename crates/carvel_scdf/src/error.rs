//! Error types for package rendering.

use thiserror::Error;

use carvel_k8s::ManifestError;
use carvel_ytt::YttError;

/// Result type alias for package operations.
pub type PackageResult<T> = Result<T, PackageError>;

/// Errors that can occur while rendering or inspecting the package.
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("Renderer error: {0}")]
    Renderer(#[from] YttError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Render failed with exit code {exit_code}: {stderr}")]
    RenderFailed { exit_code: i32, stderr: String },
}

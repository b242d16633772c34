//! Renderer trait and result types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::YttOptions;
use crate::error::YttResult;

/// Outcome of one ytt process run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOutput {
    /// True iff the process exited with status 0
    pub success: bool,
    /// Exit code (-1 when the process was terminated by a signal)
    pub exit_code: i32,
    /// Captured stdout, trimmed; the rendered manifest stream on success
    pub stdout: String,
    /// Captured stderr, trimmed; ytt diagnostics on failure
    pub stderr: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl RenderOutput {
    /// Build an output from raw captured streams.
    pub fn new(
        success: bool,
        exit_code: i32,
        stdout: &str,
        stderr: &str,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            success,
            exit_code,
            stdout: stdout.trim().to_string(),
            stderr: stderr.trim().to_string(),
            started_at,
            finished_at,
            duration_ms: (finished_at - started_at).num_milliseconds().max(0) as u64,
        }
    }

    /// Text worth showing to a user: the manifests on success, the
    /// diagnostics otherwise.
    pub fn primary_output(&self) -> &str {
        if self.success {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Something that can render templates into a manifest stream.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Check if the renderer can be invoked.
    async fn is_available(&self) -> YttResult<bool>;

    /// Version string reported by the renderer.
    async fn version(&self) -> YttResult<String>;

    /// Render once.
    ///
    /// Returns `Ok` whenever the renderer ran, whatever its exit status.
    /// Returns `Err` only when it could not be started.
    async fn render(&self, options: &YttOptions) -> YttResult<RenderOutput>;
}

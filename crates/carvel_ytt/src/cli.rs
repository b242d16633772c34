//! Process-based renderer that shells out to the ytt executable.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use chrono::Utc;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::config::{YttCliOptions, YttOptions};
use crate::error::{YttError, YttResult};
use crate::runner::{RenderOutput, Renderer};

/// Renderer backed by the ytt command line tool.
///
/// Output is fully buffered and never echoed. A non-zero exit is reported in
/// the returned [`RenderOutput`]; only spawn failures become errors.
#[derive(Debug, Clone)]
pub struct YttCli {
    options: YttCliOptions,
}

impl Default for YttCli {
    fn default() -> Self {
        Self::new(YttCliOptions::default())
    }
}

impl YttCli {
    pub fn new(options: YttCliOptions) -> Self {
        Self { options }
    }

    /// The executable this renderer invokes.
    pub fn binary(&self) -> &Path {
        &self.options.binary
    }

    pub fn options(&self) -> &YttCliOptions {
        &self.options
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.options.binary);
        cmd.args(args);
        cmd.envs(&self.options.env);
        if let Some(dir) = &self.options.working_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd
    }

    /// Format command for logging.
    pub fn format_command(&self, args: &[String]) -> String {
        let mut cmd = self.options.binary.display().to_string();
        for arg in args {
            if arg.contains(' ') || arg.contains('"') || arg.contains('[') {
                cmd.push_str(&format!(" '{}'", arg));
            } else {
                cmd.push_str(&format!(" {}", arg));
            }
        }
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> YttError {
        YttError::Spawn {
            binary: self.options.binary.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl Renderer for YttCli {
    async fn is_available(&self) -> YttResult<bool> {
        match self.command(&["version".to_string()]).output().await {
            Ok(output) => Ok(output.status.success()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.spawn_error(e)),
        }
    }

    async fn version(&self) -> YttResult<String> {
        let output = self
            .command(&["version".to_string()])
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(YttError::VersionFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }

    async fn render(&self, options: &YttOptions) -> YttResult<RenderOutput> {
        let args = options.to_args();

        info!(
            "Rendering {} template source(s) with {} data value(s)",
            options.files.len(),
            options.data_values.len() + options.data_value_yamls.len()
        );
        debug!("Command: {}", self.format_command(&args));

        let started_at = Utc::now();
        let output = self
            .command(&args)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;
        let finished_at = Utc::now();

        let result = RenderOutput::new(
            output.status.success(),
            output.status.code().unwrap_or(-1),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
            started_at,
            finished_at,
        );

        if result.success {
            info!("Render completed in {}ms", result.duration_ms);
        } else {
            error!(
                "Render failed with exit code {} after {}ms",
                result.exit_code, result.duration_ms
            );
            debug!("stderr: {}", result.stderr);
        }

        Ok(result)
    }
}

//! Where a command gets its manifest stream from.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use carvel_scdf::{DataValues, DEFAULT_CONFIG_DIR};
use carvel_ytt::{Renderer, YttCli, YttCliOptions, YttOptions, DEFAULT_YTT_BINARY};

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Read manifests from a file ('-' for stdin) instead of rendering
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Template file or directory (repeatable; defaults to the package config)
    #[arg(short, long = "file")]
    pub files: Vec<String>,

    /// Package config directory used when no --file is given
    #[arg(long, env = "SCDF_CARVEL_CONFIG", default_value = DEFAULT_CONFIG_DIR)]
    pub config: String,

    /// String data value, key=value (repeatable)
    #[arg(long = "data-value")]
    pub data_values: Vec<String>,

    /// YAML data value, key=value (repeatable)
    #[arg(long = "data-value-yaml")]
    pub data_value_yamls: Vec<String>,

    /// Add the image versions the package requires
    #[arg(long)]
    pub required: bool,

    /// ytt executable
    #[arg(long, env = "YTT_BINARY", default_value = DEFAULT_YTT_BINARY)]
    pub ytt_bin: PathBuf,
}

impl SourceArgs {
    /// Renderer options built from the flags.
    pub fn options(&self) -> YttOptions {
        let files = if self.files.is_empty() {
            vec![self.config.clone()]
        } else {
            self.files.clone()
        };

        let required = if self.required {
            DataValues::required().yamls().to_vec()
        } else {
            Vec::new()
        };

        YttOptions::new()
            .files(files)
            .data_values(self.data_values.iter().cloned())
            .data_value_yamls(required)
            .data_value_yamls(self.data_value_yamls.iter().cloned())
    }

    /// Read or render the manifest stream.
    pub async fn load(&self) -> Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() == "-" => {
                debug!("Reading manifests from stdin");
                let mut yaml = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut yaml)
                    .await
                    .context("Failed to read manifests from stdin")?;
                Ok(yaml)
            }
            Some(path) => {
                debug!("Reading manifests from {:?}", path);
                tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read manifests from {:?}", path))
            }
            None => self.render().await,
        }
    }

    async fn render(&self) -> Result<String> {
        let ytt = YttCli::new(YttCliOptions::default().binary(&self.ytt_bin));
        let options = self.options();

        info!("Rendering {} template source(s)", options.files.len());
        let output = ytt.render(&options).await?;

        if !output.success {
            anyhow::bail!(
                "Render failed with exit code {}:\n{}",
                output.exit_code,
                output.stderr
            );
        }
        Ok(output.stdout)
    }
}

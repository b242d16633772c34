//! CLI command definitions.
//!
//! Every command reads a manifest stream, either by rendering templates with
//! ytt or from a file, and reports on it.

use clap::{Parser, Subcommand, ValueEnum};

pub mod check;
pub mod find;
pub mod pull_secrets;
pub mod render;
pub mod source;

/// carvel - render and inspect the SCDF Carvel package
#[derive(Parser)]
#[command(name = "carvel")]
#[command(version, about = "carvel - render and inspect the SCDF Carvel package")]
#[command(long_about = r#"
carvel renders the Spring Cloud Data Flow Carvel package with ytt and
answers questions about the Kubernetes manifests it produces.

COMMANDS:
  render        → Render templates and print the manifests
  find          → Look up one resource by kind and name
  pull-secrets  → List pod specs that reference image pull secrets
  check         → Run the package scenarios against a live ytt

MANIFEST SOURCE:
  Without --input, templates are rendered with ytt (--ytt-bin or $YTT_BINARY).
  With --input <path>, manifests are read from a file, or stdin for '-'.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Render failure
  4 - Manifest error
  5 - Check failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render templates and print the manifests
    Render(render::RenderArgs),

    /// Look up one resource by kind and name
    Find(find::FindArgs),

    /// List pod specs that reference image pull secrets
    #[command(name = "pull-secrets")]
    PullSecrets(pull_secrets::PullSecretsArgs),

    /// Run the package scenarios against a live ytt
    Check(check::CheckArgs),
}

/// How structured results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// Serialize a value in this format.
    pub fn format<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<String> {
        Ok(match self {
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
        })
    }
}

//! Pull-secrets command - Report which pods reference image pull secrets.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;

use carvel_k8s::{find_pod_specs_with_image_pull_secrets, PodSpec};

use super::source::SourceArgs;
use super::OutputFormat;

#[derive(Args)]
pub struct PullSecretsArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Fail unless every pod references exactly this secret
    #[arg(long)]
    expect: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,
}

/// One pod spec in the report.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct PodSecrets {
    containers: Vec<String>,
    secrets: Vec<String>,
}

impl From<&PodSpec> for PodSecrets {
    fn from(pod_spec: &PodSpec) -> Self {
        Self {
            containers: pod_spec.containers.iter().map(|c| c.name.clone()).collect(),
            secrets: pod_spec
                .image_pull_secret_names()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

pub async fn execute(args: PullSecretsArgs) -> Result<()> {
    let yaml = args.source.load().await?;
    let pod_specs =
        find_pod_specs_with_image_pull_secrets(&yaml).context("Failed to parse manifests")?;
    info!("{} pod spec(s) reference pull secrets", pod_specs.len());

    let report: Vec<PodSecrets> = pod_specs.iter().map(PodSecrets::from).collect();
    print!("{}", args.output.format(&report)?);

    if let Some(expected) = &args.expect {
        let wrong = mismatches(&report, expected);
        if !wrong.is_empty() {
            for pod in &wrong {
                eprintln!(
                    "   ❌ {} uses {:?}",
                    pod.containers.join(","),
                    pod.secrets
                );
            }
            anyhow::bail!(
                "Check failed: {} pod spec(s) do not use pull secret {}",
                wrong.len(),
                expected
            );
        }
        println!("✅ All pod specs use pull secret {}", expected);
    }

    Ok(())
}

fn mismatches<'a>(report: &'a [PodSecrets], expected: &str) -> Vec<&'a PodSecrets> {
    report
        .iter()
        .filter(|pod| pod.secrets.len() != 1 || pod.secrets[0] != expected)
        .collect()
}

//! Find command - Look up one resource and optionally drill into it.

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use carvel_k8s::{find_resource, PodTemplateSpec, Resource};

use super::source::SourceArgs;
use super::OutputFormat;

#[derive(Args)]
pub struct FindArgs {
    /// Resource kind, e.g. Deployment
    pub kind: String,

    /// Resource name (metadata.name)
    pub name: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Container within the pod template
    #[arg(short, long)]
    pub container: Option<String>,

    /// Environment variable of --container; prints its literal value
    #[arg(short, long, requires = "container")]
    pub env: Option<String>,

    /// Annotation key; prints its value
    #[arg(short, long, conflicts_with = "container")]
    pub annotation: Option<String>,

    /// Dotted path below the resource root, e.g. spec.replicas
    #[arg(short, long, conflicts_with_all = ["container", "annotation"])]
    pub path: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

pub async fn execute(args: FindArgs) -> Result<()> {
    let yaml = args.source.load().await?;
    let resource = find_resource(&yaml, &args.kind, &args.name)
        .context("Failed to parse manifests")?
        .ok_or_else(|| anyhow::anyhow!("{} {} not found", args.kind, args.name))?;

    println!("{}", select(&resource, &args)?);
    Ok(())
}

/// The part of the resource the flags ask for, formatted.
fn select(resource: &Resource, args: &FindArgs) -> Result<String> {
    if let Some(key) = &args.annotation {
        return resource
            .metadata
            .annotation(key)
            .ok_or_else(|| anyhow::anyhow!("Annotation {} not found", key));
    }

    if let Some(path) = &args.path {
        let value = resource
            .field(path)
            .ok_or_else(|| anyhow::anyhow!("Field {} not found", path))?;
        return args.output.format(value);
    }

    let Some(container_name) = &args.container else {
        return args.output.format(resource);
    };

    let template = resource
        .field("spec.template")
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("{} {} has no pod template", args.kind, args.name))?;
    let template: PodTemplateSpec =
        serde_yaml::from_value(template).context("Invalid pod template")?;
    debug!("Pod template has {} container(s)", template.spec.containers.len());

    let container = template
        .spec
        .container(container_name)
        .ok_or_else(|| anyhow::anyhow!("Container {} not found", container_name))?;

    match &args.env {
        Some(env_name) => {
            let env = container
                .env_var(env_name)
                .ok_or_else(|| anyhow::anyhow!("Environment variable {} not found", env_name))?;
            match (&env.value, &env.value_from) {
                (Some(value), _) => Ok(value.clone()),
                (None, Some(value_from)) => args.output.format(value_from),
                (None, None) => Ok(String::new()),
            }
        }
        None => args.output.format(container),
    }
}

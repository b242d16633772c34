//! Render command - Print the manifest stream.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use carvel_k8s::{join_documents, parse_yaml_documents};

use super::source::SourceArgs;
use super::OutputFormat;

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,

    /// Print only documents of this kind
    #[arg(short, long)]
    kind: Option<String>,
}

pub async fn execute(args: RenderArgs) -> Result<()> {
    let yaml = args.source.load().await?;
    let documents = parse_yaml_documents(&yaml).context("Failed to parse manifests")?;

    let documents: Vec<_> = match &args.kind {
        Some(kind) => documents
            .into_iter()
            .filter(|doc| doc.kind() == Some(kind.as_str()))
            .collect(),
        None => documents,
    };
    info!("{} document(s)", documents.len());

    match args.output {
        OutputFormat::Yaml => print!("{}", join_documents(&documents)?),
        OutputFormat::Json => {
            let values = documents
                .iter()
                .map(|doc| doc.to_json())
                .collect::<Result<Vec<_>, _>>()?;
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
    }

    Ok(())
}

//! Check command - Run the package scenarios against a live ytt.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::{debug, info};

use carvel_scdf::{
    DataValues, PackageError, PackageResult, RenderedPackage, ScdfPackage, CTR_IMAGE_TAG,
    DEFAULT_CONFIG_DIR, DEFAULT_REGISTRY_SECRET, RABBITMQ_NAME, RABBIT_ENV_HOST,
    RABBIT_ENV_PASSWORD, RABBIT_ENV_PORT, RABBIT_ENV_USERNAME, SERVER_IMAGE_TAG,
    SKIPPER_IMAGE_TAG,
};
use carvel_ytt::{Renderer, YttCli, YttCliOptions, DEFAULT_YTT_BINARY};

#[derive(Args)]
pub struct CheckArgs {
    /// Package config directory
    #[arg(long, env = "SCDF_CARVEL_CONFIG", default_value = DEFAULT_CONFIG_DIR)]
    config: String,

    /// ytt executable
    #[arg(long, env = "YTT_BINARY", default_value = DEFAULT_YTT_BINARY)]
    ytt_bin: PathBuf,

    /// Secret name used for the registry scenario
    #[arg(long, default_value = "fakeref")]
    secret_ref: String,
}

/// Outcome of one scenario: `Ok(())` or the reasons it failed.
type Verdict = Result<(), Vec<String>>;

pub async fn execute(args: CheckArgs) -> Result<()> {
    let ytt = YttCli::new(YttCliOptions::default().binary(&args.ytt_bin));
    if !ytt.is_available().await? {
        anyhow::bail!("ytt not found: {}", args.ytt_bin.display());
    }
    debug!("Using {}", ytt.version().await?);

    let package = ScdfPackage::new(Arc::new(ytt)).with_config_dir(&args.config);
    if !package.config_exists() {
        anyhow::bail!("Config directory not found: {}", args.config);
    }

    info!("Checking package in {}", args.config);
    println!("🧪 Checking package scenarios...\n");

    let verdicts = run_scenarios(&package, &args.secret_ref).await?;

    let mut failed = 0;
    for (name, verdict) in &verdicts {
        match verdict {
            Ok(()) => println!("✅ {}", name),
            Err(reasons) => {
                failed += 1;
                println!("❌ {}", name);
                for reason in reasons {
                    println!("   - {}", reason);
                }
            }
        }
    }

    println!();
    if failed > 0 {
        anyhow::bail!("Check failed: {} of {} scenario(s)", failed, verdicts.len());
    }
    println!("All {} scenarios passed", verdicts.len());
    Ok(())
}

/// Run every scenario; only a renderer that cannot run at all is an error.
async fn run_scenarios(
    package: &ScdfPackage,
    secret_ref: &str,
) -> PackageResult<Vec<(&'static str, Verdict)>> {
    Ok(vec![
        ("renders with required versions", renders_with_required(package).await?),
        ("rejects missing versions", rejects_missing_versions(package).await?),
        ("external rabbit binder", external_rabbit(package).await?),
        (
            "custom registry secret",
            custom_registry_secret(package, secret_ref).await?,
        ),
    ])
}

/// Render for a scenario that needs manifests. A failed render fails the
/// scenario with ytt's stderr.
async fn render_scenario(
    package: &ScdfPackage,
    values: &DataValues,
) -> PackageResult<Result<RenderedPackage, Vec<String>>> {
    match package.render_manifests(values).await {
        Ok(rendered) => Ok(Ok(rendered)),
        Err(PackageError::RenderFailed { exit_code, stderr }) => {
            debug!("Scenario render exited with {}", exit_code);
            Ok(Err(vec![stderr]))
        }
        Err(e) => Err(e),
    }
}

async fn renders_with_required(package: &ScdfPackage) -> PackageResult<Verdict> {
    let output = package.render(&DataValues::required()).await?;
    Ok(if output.success {
        Ok(())
    } else {
        Err(vec![output.stderr])
    })
}

async fn rejects_missing_versions(package: &ScdfPackage) -> PackageResult<Verdict> {
    let output = package.render(&DataValues::new()).await?;
    if output.success {
        return Ok(Err(vec!["render succeeded without image versions".to_string()]));
    }

    let missing: Vec<String> = [SERVER_IMAGE_TAG, SKIPPER_IMAGE_TAG, CTR_IMAGE_TAG]
        .iter()
        .filter(|key| !output.stderr.contains(*key))
        .map(|key| format!("stderr does not mention {}", key))
        .collect();
    Ok(verdict(missing))
}

async fn external_rabbit(package: &ScdfPackage) -> PackageResult<Verdict> {
    let values = DataValues::required().external_rabbit("localhost", 1234, "user", "pass");
    let rendered = match render_scenario(package, &values).await? {
        Ok(rendered) => rendered,
        Err(reasons) => return Ok(Err(reasons)),
    };
    let mut problems = Vec::new();

    if rendered.deployment(RABBITMQ_NAME)?.is_some() {
        problems.push(format!("{} Deployment is still rendered", RABBITMQ_NAME));
    }

    let env = rendered.skipper_platform_environment()?;
    for (key, expected) in [
        (RABBIT_ENV_HOST, "localhost"),
        (RABBIT_ENV_PORT, "1234"),
        (RABBIT_ENV_USERNAME, "user"),
        (RABBIT_ENV_PASSWORD, "pass"),
    ] {
        let actual = env.get(key).map(String::as_str);
        if actual != Some(expected) {
            problems.push(format!("{} is {:?}, expected {:?}", key, actual, expected));
        }
    }
    Ok(verdict(problems))
}

async fn custom_registry_secret(
    package: &ScdfPackage,
    secret_ref: &str,
) -> PackageResult<Verdict> {
    let values = DataValues::required().registry_secret_ref(secret_ref);
    let rendered = match render_scenario(package, &values).await? {
        Ok(rendered) => rendered,
        Err(reasons) => return Ok(Err(reasons)),
    };
    let mut problems = Vec::new();

    for pod_spec in rendered.pod_specs_with_image_pull_secrets()? {
        let names = pod_spec.image_pull_secret_names();
        if names != [secret_ref] {
            let containers: Vec<&str> =
                pod_spec.containers.iter().map(|c| c.name.as_str()).collect();
            problems.push(format!("{} uses {:?}", containers.join(","), names));
        }
    }

    if rendered.secret(DEFAULT_REGISTRY_SECRET)?.is_some() {
        problems.push(format!("{} Secret is still rendered", DEFAULT_REGISTRY_SECRET));
    }
    Ok(verdict(problems))
}

fn verdict(problems: Vec<String>) -> Verdict {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

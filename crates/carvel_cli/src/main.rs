//! carvel CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Render failure
//! - 4: Manifest error
//! - 5: Check failure

use std::process::ExitCode;

use carvel_ytt::YttError;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const RENDER_FAILURE: u8 = 3;
    pub const MANIFEST_ERROR: u8 = 4;
    pub const CHECK_FAILURE: u8 = 5;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "carvel=debug"
    } else if cli.quiet {
        "carvel=error"
    } else {
        "carvel=info"
    };

    let mut filter = EnvFilter::from_default_env();
    for directive in [level, "warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::Render(args) => commands::render::execute(args).await,
        Commands::Find(args) => commands::find::execute(args).await,
        Commands::PullSecrets(args) => commands::pull_secrets::execute(args).await,
        Commands::Check(args) => commands::check::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    let msg = format!("{:#}", e).to_lowercase();

    if msg.contains("check failed") {
        ExitCodes::CHECK_FAILURE
    } else if e.chain().any(|cause| cause.is::<YttError>()) {
        ExitCodes::RENDER_FAILURE
    } else if e.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
    }) {
        ExitCodes::INVALID_ARGS
    } else if msg.contains("render failed") || msg.contains("failed to spawn") {
        ExitCodes::RENDER_FAILURE
    } else if msg.contains("yaml") || msg.contains("manifest") {
        ExitCodes::MANIFEST_ERROR
    } else if msg.contains("argument") || msg.contains("not found") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

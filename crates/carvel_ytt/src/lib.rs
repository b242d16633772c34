//! # carvel_ytt
//!
//! ytt invocation adapter for carvel-check.
//!
//! Turns a structured [`YttOptions`] value into ytt's repeated-flag command
//! line, runs the executable once with output fully buffered, and reports the
//! outcome without treating a non-zero exit as an error.
//!
//! # Features
//!
//! - **Flag translation**: `--file`, `--data-value`, `--data-value-yaml`
//! - **Buffered capture**: stdout/stderr collected in full and trimmed
//! - **Distinct failures**: spawn errors are `Err`, render failures are `success: false`
//! - **Mock Renderer**: for testing without a ytt installation
//!
//! # Example
//!
//! ```rust,no_run
//! use carvel_ytt::{Renderer, YttCli, YttCliOptions, YttOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ytt = YttCli::new(YttCliOptions::default());
//!
//!     let options = YttOptions::new()
//!         .file("config")
//!         .data_value_yaml("scdf.server.image.tag=2.8.1");
//!
//!     let result = ytt.render(&options).await?;
//!     if !result.success {
//!         eprintln!("{}", result.stderr);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod mock;
pub mod runner;

pub use cli::YttCli;
pub use config::{
    YttCliOptions, YttOptions, DATA_VALUE_FLAG, DATA_VALUE_YAML_FLAG, DEFAULT_YTT_BINARY,
    FILE_FLAG, YTT_BINARY_ENV,
};
pub use error::{YttError, YttResult};
pub use mock::{MockRenderer, MockResponse};
pub use runner::{RenderOutput, Renderer};

//! # carvel_scdf
//!
//! The Spring Cloud Data Flow Carvel package as seen from the outside.
//!
//! [`ScdfPackage`] renders the package templates through any
//! [`Renderer`](carvel_ytt::Renderer) with a [`DataValues`] set, and
//! [`RenderedPackage`] answers questions about the resulting manifests:
//! which server and Skipper containers were produced, what their config maps
//! say, and which pull secrets the pods use.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use carvel_scdf::{DataValues, ScdfPackage};
//! use carvel_ytt::{YttCli, YttCliOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let package = ScdfPackage::new(Arc::new(YttCli::new(YttCliOptions::default())))
//!         .with_config_dir("config");
//!
//!     let values = DataValues::required().external_rabbit("localhost", 1234, "user", "pass");
//!     let rendered = package.render_manifests(&values).await?;
//!
//!     let env = rendered.skipper_platform_environment()?;
//!     assert_eq!(env["SPRING_RABBITMQ_HOST"], "localhost");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod names;
pub mod package;
pub mod values;

pub use error::{PackageError, PackageResult};
pub use names::*;
pub use package::{RenderedPackage, ScdfPackage};
pub use values::{BinderType, DataValues};

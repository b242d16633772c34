//! Rendering the package and inspecting what it produced.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info};

use carvel_k8s::{
    config_map_document, find_config_map, find_deployment, find_pod_specs_with_image_pull_secrets,
    find_resource, find_secret, find_service, find_stateful_set, parse_env_string,
    parse_yaml_documents, scalar_to_string, ConfigMap, Container, Deployment, ManifestDocument,
    PodSpec, Resource, Secret, Service, StatefulSet,
};
use carvel_ytt::{RenderOutput, Renderer, YttOptions};

use crate::error::{PackageError, PackageResult};
use crate::names::{
    APPLICATION_CONFIG_KEY, CONFIG_DIR_ENV, DEFAULT_CONFIG_DIR, SCDF_SERVER_NAME,
    SKIPPER_NAME, SKIPPER_PLATFORM_ENV_PATH,
};
use crate::values::DataValues;

/// The package templates plus the renderer that evaluates them.
pub struct ScdfPackage {
    renderer: Arc<dyn Renderer>,
    config_dir: String,
}

impl ScdfPackage {
    /// Create a package rooted at `$SCDF_CARVEL_CONFIG`, or `config`.
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        let config_dir =
            std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
        Self {
            renderer,
            config_dir,
        }
    }

    /// Set the template directory.
    pub fn with_config_dir(mut self, config_dir: impl Into<String>) -> Self {
        self.config_dir = config_dir.into();
        self
    }

    pub fn config_dir(&self) -> &str {
        &self.config_dir
    }

    /// Whether the template directory exists on disk.
    pub fn config_exists(&self) -> bool {
        Path::new(&self.config_dir).is_dir()
    }

    /// Renderer options for the given values.
    pub fn options(&self, values: &DataValues) -> YttOptions {
        values.to_options([self.config_dir.as_str()])
    }

    /// Render once and return the raw outcome, successful or not.
    pub async fn render(&self, values: &DataValues) -> PackageResult<RenderOutput> {
        info!("Rendering package from {}", self.config_dir);
        let output = self.renderer.render(&self.options(values)).await?;
        debug!(
            "Render finished: success={}, {}ms",
            output.success, output.duration_ms
        );
        Ok(output)
    }

    /// Render and require success.
    pub async fn render_manifests(&self, values: &DataValues) -> PackageResult<RenderedPackage> {
        let output = self.render(values).await?;
        if !output.success {
            error!("Package render failed: {}", output.stderr);
            return Err(PackageError::RenderFailed {
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }
        Ok(RenderedPackage::new(output.stdout))
    }
}

/// A successfully rendered manifest stream.
///
/// Every accessor re-reads the stream; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPackage {
    yaml: String,
}

impl RenderedPackage {
    pub fn new(yaml: impl Into<String>) -> Self {
        Self { yaml: yaml.into() }
    }

    pub fn yaml(&self) -> &str {
        &self.yaml
    }

    pub fn documents(&self) -> PackageResult<Vec<ManifestDocument>> {
        Ok(parse_yaml_documents(&self.yaml)?)
    }

    pub fn resource(&self, kind: &str, name: &str) -> PackageResult<Option<Resource>> {
        Ok(find_resource(&self.yaml, kind, name)?)
    }

    pub fn deployment(&self, name: &str) -> PackageResult<Option<Deployment>> {
        Ok(find_deployment(&self.yaml, name)?)
    }

    pub fn stateful_set(&self, name: &str) -> PackageResult<Option<StatefulSet>> {
        Ok(find_stateful_set(&self.yaml, name)?)
    }

    pub fn service(&self, name: &str) -> PackageResult<Option<Service>> {
        Ok(find_service(&self.yaml, name)?)
    }

    pub fn config_map(&self, name: &str) -> PackageResult<Option<ConfigMap>> {
        Ok(find_config_map(&self.yaml, name)?)
    }

    pub fn secret(&self, name: &str) -> PackageResult<Option<Secret>> {
        Ok(find_secret(&self.yaml, name)?)
    }

    pub fn server_deployment(&self) -> PackageResult<Option<Deployment>> {
        self.deployment(SCDF_SERVER_NAME)
    }

    pub fn skipper_deployment(&self) -> PackageResult<Option<Deployment>> {
        self.deployment(SKIPPER_NAME)
    }

    /// The `scdf-server` container of the `scdf-server` Deployment.
    pub fn server_container(&self) -> PackageResult<Option<Container>> {
        self.named_container(SCDF_SERVER_NAME)
    }

    pub fn skipper_container(&self) -> PackageResult<Option<Container>> {
        self.named_container(SKIPPER_NAME)
    }

    pub fn server_service(&self) -> PackageResult<Option<Service>> {
        self.service(SCDF_SERVER_NAME)
    }

    pub fn skipper_service(&self) -> PackageResult<Option<Service>> {
        self.service(SKIPPER_NAME)
    }

    /// `application.yaml` of the named ConfigMap, parsed.
    pub fn application_config(&self, name: &str) -> PackageResult<Option<ManifestDocument>> {
        match self.config_map(name)? {
            Some(config_map) => Ok(config_map_document(&config_map, APPLICATION_CONFIG_KEY)?),
            None => Ok(None),
        }
    }

    pub fn server_application_config(&self) -> PackageResult<Option<ManifestDocument>> {
        self.application_config(SCDF_SERVER_NAME)
    }

    pub fn skipper_application_config(&self) -> PackageResult<Option<ManifestDocument>> {
        self.application_config(SKIPPER_NAME)
    }

    /// Scalar at a dotted path of the named ConfigMap's `application.yaml`.
    pub fn application_config_value(
        &self,
        name: &str,
        path: &str,
    ) -> PackageResult<Option<String>> {
        Ok(self
            .application_config(name)?
            .and_then(|doc| doc.get(path).and_then(scalar_to_string)))
    }

    /// Environment Skipper passes to the apps it deploys.
    ///
    /// Empty when Skipper has no config or sets no environment.
    pub fn skipper_platform_environment(&self) -> PackageResult<HashMap<String, String>> {
        let env = self.application_config_value(SKIPPER_NAME, SKIPPER_PLATFORM_ENV_PATH)?;
        debug!("Skipper platform environment: {:?}", env);
        Ok(env.as_deref().map(parse_env_string).unwrap_or_default())
    }

    /// Pod specs that declare pull secrets, Deployments first.
    pub fn pod_specs_with_image_pull_secrets(&self) -> PackageResult<Vec<PodSpec>> {
        Ok(find_pod_specs_with_image_pull_secrets(&self.yaml)?)
    }

    /// Every distinct pull secret name referenced by a pod spec, in first-seen order.
    pub fn image_pull_secret_names(&self) -> PackageResult<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        for pod_spec in self.pod_specs_with_image_pull_secrets()? {
            for name in pod_spec.image_pull_secret_names() {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    fn named_container(&self, name: &str) -> PackageResult<Option<Container>> {
        Ok(self
            .deployment(name)?
            .and_then(|deployment| deployment.container(name).cloned()))
    }
}

//! Data-value assignments for the package.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use carvel_ytt::YttOptions;

use crate::names::{
    CTR_IMAGE_TAG, DEFAULT_REQUIRED_DATA_VALUES, SERVER_IMAGE_TAG, SKIPPER_IMAGE_TAG,
};

/// Message binder the platform is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinderType {
    Rabbit,
    Kafka,
}

impl BinderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinderType::Rabbit => "rabbit",
            BinderType::Kafka => "kafka",
        }
    }
}

impl fmt::Display for BinderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of `key=value` assignments handed to the renderer.
///
/// Most settings are YAML-valued (`--data-value-yaml`) so that numbers and
/// booleans keep their type; [`DataValues::scalar`] forces a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataValues {
    scalars: Vec<String>,
    yamls: Vec<String>,
}

impl DataValues {
    /// No assignments at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// The image versions the package cannot render without.
    pub fn required() -> Self {
        DEFAULT_REQUIRED_DATA_VALUES
            .iter()
            .fold(Self::new(), |values, (key, value)| values.set(*key, *value))
    }

    /// Add a YAML-valued assignment.
    pub fn set(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.yamls.push(format!("{}={}", key, value));
        self
    }

    /// Add a string-valued assignment.
    pub fn scalar(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.scalars.push(format!("{}={}", key, value));
        self
    }

    pub fn server_image_tag(self, tag: &str) -> Self {
        self.set(SERVER_IMAGE_TAG, tag)
    }

    pub fn server_image_digest(self, digest: &str) -> Self {
        self.set("scdf.server.image.digest", digest)
    }

    pub fn server_image_repository(self, repository: &str) -> Self {
        self.set("scdf.server.image.repository", repository)
    }

    pub fn skipper_image_tag(self, tag: &str) -> Self {
        self.set(SKIPPER_IMAGE_TAG, tag)
    }

    pub fn skipper_image_digest(self, digest: &str) -> Self {
        self.set("scdf.skipper.image.digest", digest)
    }

    pub fn ctr_image_tag(self, tag: &str) -> Self {
        self.set(CTR_IMAGE_TAG, tag)
    }

    pub fn ctr_image_digest(self, digest: &str) -> Self {
        self.set("scdf.ctr.image.digest", digest)
    }

    pub fn ctr_image_repository(self, repository: &str) -> Self {
        self.set("scdf.ctr.image.repository", repository)
    }

    pub fn binder(self, binder: BinderType) -> Self {
        self.set("scdf.binder.type", binder)
    }

    /// Use a RabbitMQ broker outside the package instead of deploying one.
    ///
    /// Host and credentials are passed as strings, so a password such as
    /// `true` or `1234` reaches the templates unchanged.
    pub fn external_rabbit(self, host: &str, port: u16, username: &str, password: &str) -> Self {
        self.binder(BinderType::Rabbit)
            .scalar("scdf.binder.rabbit.host", host)
            .set("scdf.binder.rabbit.port", port)
            .scalar("scdf.binder.rabbit.username", username)
            .scalar("scdf.binder.rabbit.password", password)
    }

    /// Use a Kafka cluster outside the package instead of deploying one.
    pub fn external_kafka(
        self,
        broker_host: &str,
        broker_port: u16,
        zk_host: &str,
        zk_port: u16,
    ) -> Self {
        self.binder(BinderType::Kafka)
            .set("scdf.binder.kafka.broker.host", broker_host)
            .set("scdf.binder.kafka.broker.port", broker_port)
            .set("scdf.binder.kafka.zk.host", zk_host)
            .set("scdf.binder.kafka.zk.port", zk_port)
    }

    /// Reference an existing pull secret; no `reg-creds` Secret is generated.
    pub fn registry_secret_ref(self, name: &str) -> Self {
        self.set("scdf.registry.secret.ref", name)
    }

    pub fn server_service_type(self, service_type: &str) -> Self {
        self.set("scdf.server.service.type", service_type)
    }

    pub fn skipper_service_type(self, service_type: &str) -> Self {
        self.set("scdf.skipper.service.type", service_type)
    }

    pub fn server_context_path(self, path: &str) -> Self {
        self.set("scdf.server.contextPath", path)
    }

    /// Container resource setting, e.g. `("limits", "cpu", "500m")`.
    pub fn server_resource(self, section: &str, resource: &str, quantity: &str) -> Self {
        self.set(
            &format!("scdf.server.resources.{}.{}", section, resource),
            quantity,
        )
    }

    pub fn skipper_resource(self, section: &str, resource: &str, quantity: &str) -> Self {
        self.set(
            &format!("scdf.skipper.resources.{}.{}", section, resource),
            quantity,
        )
    }

    /// Extra entry merged into the server's application config.
    pub fn server_config(self, path: &str, value: impl fmt::Display) -> Self {
        self.set(&format!("scdf.server.config.{}", path), value)
    }

    pub fn skipper_config(self, path: &str, value: impl fmt::Display) -> Self {
        self.set(&format!("scdf.skipper.config.{}", path), value)
    }

    /// Extra environment entries for the server container.
    pub fn server_env(self, env: &[(&str, &str)]) -> Self {
        self.set("scdf.server.env", env_list(env))
    }

    pub fn skipper_env(self, env: &[(&str, &str)]) -> Self {
        self.set("scdf.skipper.env", env_list(env))
    }

    pub fn monitoring_grafana(self, enabled: bool) -> Self {
        self.set("scdf.feature.monitoring.grafana.enabled", enabled)
    }

    pub fn monitoring_prometheus_proxy(self, enabled: bool) -> Self {
        self.set(
            "scdf.feature.monitoring.prometheusRsocketProxy.enabled",
            enabled,
        )
    }

    pub fn metrics_dashboard_url(self, url: &str) -> Self {
        self.set("scdf.server.metrics.dashboard.url", url)
    }

    pub fn scalars(&self) -> &[String] {
        &self.scalars
    }

    pub fn yamls(&self) -> &[String] {
        &self.yamls
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.yamls.is_empty()
    }

    /// Renderer options for these values over the given template sources.
    pub fn to_options<I, S>(&self, files: I) -> YttOptions
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        YttOptions::new()
            .files(files)
            .data_values(self.scalars.iter().cloned())
            .data_value_yamls(self.yamls.iter().cloned())
    }
}

/// `[{"name":..,"value":..}]` as flow YAML.
fn env_list(env: &[(&str, &str)]) -> serde_json::Value {
    env.iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect()
}

//! Kubernetes resource shapes.
//!
//! Only the fields the lookups navigate are modelled. Everything else in a
//! document is kept in [`Resource::fields`] or ignored by the typed views.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::de::{nullable, optional_scalar, scalar_to_string};
use crate::document::value_at_path;
use crate::error::{ManifestError, ManifestResult};

/// Resource kinds the typed lookups understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deployment,
    StatefulSet,
    Service,
    ConfigMap,
    Secret,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "Deployment",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::Service => "Service",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Object metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: Option<String>,
    pub namespace: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub labels: Mapping,
    /// Kept as a mapping so iteration follows the source document
    #[serde(deserialize_with = "nullable")]
    pub annotations: Mapping,
}

impl ObjectMeta {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Annotation value for an exact key.
    pub fn annotation(&self, key: &str) -> Option<String> {
        self.annotations.get(key).and_then(scalar_to_string)
    }

    /// Values of every annotation whose key contains `fragment`, in source
    /// order.
    pub fn annotations_containing(&self, fragment: &str) -> Vec<String> {
        self.annotations
            .iter()
            .filter(|(key, _)| key.as_str().map_or(false, |k| k.contains(fragment)))
            .filter_map(|(_, value)| scalar_to_string(value))
            .collect()
    }

    pub fn label(&self, key: &str) -> Option<String> {
        self.labels.get(key).and_then(scalar_to_string)
    }
}

/// Any resource document: header fields plus everything else untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    /// Remaining top-level fields (`spec`, `data`, ...)
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Resource {
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.name()
    }

    /// Identity check on the `(kind, name)` pair.
    pub fn is(&self, kind: &str, name: &str) -> bool {
        self.kind() == Some(kind) && self.name() == Some(name)
    }

    /// Nested value below a top-level field, e.g. `spec.template.spec`.
    pub fn field(&self, path: &str) -> Option<&Value> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, rest),
            None => (path, ""),
        };
        self.fields
            .get(head)
            .and_then(|value| value_at_path(value, rest))
    }

    /// Decode into one of the typed views.
    pub fn decode<T: DeserializeOwned>(&self) -> ManifestResult<T> {
        let value = serde_yaml::to_value(self)?;
        serde_yaml::from_value(value).map_err(|e| ManifestError::Decode {
            kind: self.kind().unwrap_or("<none>").to_string(),
            name: self.name().unwrap_or("<none>").to_string(),
            message: e.to_string(),
        })
    }
}

/// A typed view over a resource kind.
pub trait TypedResource: DeserializeOwned {
    const KIND: ResourceKind;

    fn metadata(&self) -> &ObjectMeta;
}

/// Pod template wrapper shared by workload kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PodTemplateSpec {
    #[serde(deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "nullable")]
    pub spec: PodSpec,
}

/// Pod specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PodSpec {
    #[serde(deserialize_with = "nullable")]
    pub containers: Vec<Container>,
    #[serde(deserialize_with = "nullable")]
    pub init_containers: Vec<Container>,
    #[serde(deserialize_with = "nullable")]
    pub volumes: Vec<Volume>,
    #[serde(deserialize_with = "nullable")]
    pub image_pull_secrets: Vec<LocalObjectReference>,
    pub service_account_name: Option<String>,
}

impl PodSpec {
    /// First container with the given name.
    pub fn container(&self, name: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.name == name)
    }

    /// First init container with the given name.
    pub fn init_container(&self, name: &str) -> Option<&Container> {
        self.init_containers.iter().find(|c| c.name == name)
    }

    /// First volume with the given name.
    pub fn volume(&self, name: &str) -> Option<&Volume> {
        self.volumes.iter().find(|v| v.name == name)
    }

    pub fn image_pull_secret_names(&self) -> Vec<&str> {
        self.image_pull_secrets
            .iter()
            .filter_map(|s| s.name.as_deref())
            .collect()
    }
}

/// Reference to an object in the same namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalObjectReference {
    pub name: Option<String>,
}

/// Container definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Container {
    pub name: String,
    pub image: Option<String>,
    pub image_pull_policy: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub command: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub args: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub env: Vec<EnvVar>,
    #[serde(deserialize_with = "nullable")]
    pub ports: Vec<ContainerPort>,
    #[serde(deserialize_with = "nullable")]
    pub volume_mounts: Vec<VolumeMount>,
    pub resources: Option<ResourceRequirements>,
    pub liveness_probe: Option<Probe>,
    pub readiness_probe: Option<Probe>,
}

impl Container {
    /// First environment entry with the given name.
    pub fn env_var(&self, name: &str) -> Option<&EnvVar> {
        self.env.iter().find(|e| e.name == name)
    }

    /// Literal value of the first environment entry with the given name.
    pub fn env_value(&self, name: &str) -> Option<&str> {
        self.env_var(name).and_then(|e| e.value.as_deref())
    }

    /// First volume mount with the given name.
    pub fn volume_mount(&self, name: &str) -> Option<&VolumeMount> {
        self.volume_mounts.iter().find(|m| m.name == name)
    }
}

/// Environment variable entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvVar {
    pub name: String,
    #[serde(deserialize_with = "optional_scalar")]
    pub value: Option<String>,
    pub value_from: Option<Value>,
}

impl EnvVar {
    /// `valueFrom` reference at a dot-separated path, e.g.
    /// `fieldRef.fieldPath`.
    pub fn value_from(&self, path: &str) -> Option<&Value> {
        self.value_from
            .as_ref()
            .and_then(|value| value_at_path(value, path))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerPort {
    pub name: Option<String>,
    pub container_port: i32,
    pub protocol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
    pub sub_path: Option<String>,
    pub read_only: Option<bool>,
}

/// Volume definition; the source (`secret`, `configMap`, ...) stays generic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub source: BTreeMap<String, Value>,
}

impl Volume {
    /// Name of the source type, e.g. `secret` or `configMap`.
    pub fn source_type(&self) -> Option<&str> {
        self.source.keys().next().map(String::as_str)
    }

    /// Value below the source, e.g. `secret.secretName`.
    pub fn source_field(&self, path: &str) -> Option<&Value> {
        let (head, rest) = path.split_once('.').unwrap_or((path, ""));
        self.source
            .get(head)
            .and_then(|value| value_at_path(value, rest))
    }
}

/// Compute resource limits and requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceRequirements {
    #[serde(deserialize_with = "nullable")]
    pub limits: Mapping,
    #[serde(deserialize_with = "nullable")]
    pub requests: Mapping,
}

impl ResourceRequirements {
    pub fn limit(&self, resource: &str) -> Option<String> {
        self.limits.get(resource).and_then(scalar_to_string)
    }

    pub fn request(&self, resource: &str) -> Option<String> {
        self.requests.get(resource).and_then(scalar_to_string)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Probe {
    pub http_get: Option<HttpGetAction>,
    pub initial_delay_seconds: Option<i32>,
    pub period_seconds: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpGetAction {
    pub path: Option<String>,
    pub port: Option<Value>,
}

/// `apps/v1` Deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deployment {
    #[serde(deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "nullable")]
    pub spec: WorkloadSpec,
}

/// `apps/v1` StatefulSet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatefulSet {
    #[serde(deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "nullable")]
    pub spec: WorkloadSpec,
}

/// Spec fields shared by Deployments and StatefulSets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkloadSpec {
    pub replicas: Option<i32>,
    pub service_name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub template: PodTemplateSpec,
}

impl Deployment {
    pub fn pod_spec(&self) -> &PodSpec {
        &self.spec.template.spec
    }

    pub fn container(&self, name: &str) -> Option<&Container> {
        self.pod_spec().container(name)
    }

    pub fn volume(&self, name: &str) -> Option<&Volume> {
        self.pod_spec().volume(name)
    }
}

impl StatefulSet {
    pub fn pod_spec(&self) -> &PodSpec {
        &self.spec.template.spec
    }

    pub fn container(&self, name: &str) -> Option<&Container> {
        self.pod_spec().container(name)
    }

    pub fn volume(&self, name: &str) -> Option<&Volume> {
        self.pod_spec().volume(name)
    }
}

/// `v1` Service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "nullable")]
    pub spec: ServiceSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceSpec {
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    #[serde(rename = "clusterIP")]
    pub cluster_ip: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub ports: Vec<ServicePort>,
    #[serde(deserialize_with = "nullable")]
    pub selector: Mapping,
}

impl Service {
    pub fn port(&self, name: &str) -> Option<&ServicePort> {
        self.spec
            .ports
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicePort {
    pub name: Option<String>,
    pub port: i32,
    pub target_port: Option<Value>,
    pub node_port: Option<i32>,
    pub protocol: Option<String>,
}

/// `v1` ConfigMap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigMap {
    #[serde(deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    #[serde(deserialize_with = "nullable")]
    pub data: BTreeMap<String, String>,
}

impl ConfigMap {
    pub fn entry(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// `v1` Secret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Secret {
    #[serde(deserialize_with = "nullable")]
    pub metadata: ObjectMeta,
    #[serde(rename = "type")]
    pub secret_type: Option<String>,
    /// Base64-encoded entries, as rendered
    #[serde(deserialize_with = "nullable")]
    pub data: BTreeMap<String, String>,
    #[serde(deserialize_with = "nullable")]
    pub string_data: BTreeMap<String, String>,
}

macro_rules! typed_resource {
    ($ty:ty, $kind:expr) => {
        impl TypedResource for $ty {
            const KIND: ResourceKind = $kind;

            fn metadata(&self) -> &ObjectMeta {
                &self.metadata
            }
        }
    };
}

typed_resource!(Deployment, ResourceKind::Deployment);
typed_resource!(StatefulSet, ResourceKind::StatefulSet);
typed_resource!(Service, ResourceKind::Service);
typed_resource!(ConfigMap, ResourceKind::ConfigMap);
typed_resource!(Secret, ResourceKind::Secret);

//! # carvel_k8s
//!
//! Lookup and projection over rendered Kubernetes manifest streams.
//!
//! The input is the multi-document YAML produced by a templating tool. This
//! crate splits it into documents, finds resources by `(kind, name)` and
//! navigates one level into containers, volumes, environment variables and
//! annotations. A miss is always `None`; only unparseable YAML is an error.
//!
//! ## Example
//!
//! ```rust
//! use carvel_k8s::{find_deployment, parse_env_string};
//!
//! let yaml = r#"
//! apiVersion: apps/v1
//! kind: Deployment
//! metadata:
//!   name: skipper
//! spec:
//!   template:
//!     spec:
//!       containers:
//!       - name: skipper
//!         image: springcloud/spring-cloud-skipper-server:2.7.1
//! "#;
//!
//! let deployment = find_deployment(yaml, "skipper").unwrap().unwrap();
//! let container = deployment.container("skipper").unwrap();
//! assert_eq!(
//!     container.image.as_deref(),
//!     Some("springcloud/spring-cloud-skipper-server:2.7.1")
//! );
//!
//! let env = parse_env_string("SPRING_RABBITMQ_HOST=rabbit,SPRING_RABBITMQ_PORT=5672");
//! assert_eq!(env["SPRING_RABBITMQ_PORT"], "5672");
//! ```

mod de;
pub mod document;
pub mod error;
pub mod query;
pub mod resource;

pub use de::scalar_to_string;
pub use document::{
    join_documents, parse_yaml_document, parse_yaml_documents, value_at_path, ManifestDocument,
};
pub use error::{ManifestError, ManifestResult};
pub use query::{
    config_map_document, container_env_value, container_env_values, container_volume_mount,
    deployment_container, deployment_volume, find_all_of_kind, find_annotation, find_annotations,
    find_config_map, find_deployment, find_pod_specs_with_image_pull_secrets, find_resource,
    find_secret, find_service, find_stateful_set, find_typed, parse_env_string, resources,
    stateful_set_container,
};
pub use resource::{
    ConfigMap, Container, ContainerPort, Deployment, EnvVar, HttpGetAction, LocalObjectReference,
    ObjectMeta, PodSpec, PodTemplateSpec, Probe, Resource, ResourceKind, ResourceRequirements,
    Secret, Service, ServicePort, ServiceSpec, StatefulSet, TypedResource, Volume, VolumeMount,
    WorkloadSpec,
};

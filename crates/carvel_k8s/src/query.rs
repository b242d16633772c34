//! Lookups over a rendered manifest stream.
//!
//! Every function takes the raw YAML text and re-parses it; nothing is cached
//! between calls. Lookups return the first match in document order and
//! report a miss as `None`.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::document::{parse_yaml_document, parse_yaml_documents, ManifestDocument};
use crate::error::ManifestResult;
use crate::resource::{
    ConfigMap, Container, Deployment, EnvVar, ObjectMeta, PodSpec, Resource, ResourceKind, Secret,
    Service, StatefulSet, TypedResource, Volume, VolumeMount,
};

/// Decode the header of every mapping document in the stream.
///
/// Documents that are not mappings (empty documents, bare scalars) carry no
/// resource and are skipped.
pub fn resources(yaml: &str) -> ManifestResult<Vec<Resource>> {
    let documents = parse_yaml_documents(yaml)?;
    let mut resources = Vec::with_capacity(documents.len());

    for (index, document) in documents.iter().enumerate() {
        if !document.value().is_mapping() {
            debug!("Skipping non-mapping document #{}", index);
            continue;
        }
        let resource = document.decode::<Resource>()?;
        if resource.kind().is_none() {
            warn!("Document #{} has no kind", index);
        }
        resources.push(resource);
    }

    Ok(resources)
}

/// First resource whose `kind` and `metadata.name` both match.
pub fn find_resource(yaml: &str, kind: &str, name: &str) -> ManifestResult<Option<Resource>> {
    let found = resources(yaml)?.into_iter().find(|r| r.is(kind, name));
    if found.is_none() {
        debug!("No {} named {} in rendered output", kind, name);
    }
    Ok(found)
}

/// Every resource of a kind, in document order.
pub fn find_all_of_kind(yaml: &str, kind: &str) -> ManifestResult<Vec<Resource>> {
    Ok(resources(yaml)?
        .into_iter()
        .filter(|r| r.kind() == Some(kind))
        .collect())
}

/// First matching resource decoded into its typed view.
pub fn find_typed<T: TypedResource>(yaml: &str, name: &str) -> ManifestResult<Option<T>> {
    find_resource(yaml, T::KIND.as_str(), name)?
        .map(|resource| resource.decode::<T>())
        .transpose()
}

pub fn find_deployment(yaml: &str, name: &str) -> ManifestResult<Option<Deployment>> {
    find_typed(yaml, name)
}

pub fn find_stateful_set(yaml: &str, name: &str) -> ManifestResult<Option<StatefulSet>> {
    find_typed(yaml, name)
}

pub fn find_service(yaml: &str, name: &str) -> ManifestResult<Option<Service>> {
    find_typed(yaml, name)
}

pub fn find_config_map(yaml: &str, name: &str) -> ManifestResult<Option<ConfigMap>> {
    find_typed(yaml, name)
}

pub fn find_secret(yaml: &str, name: &str) -> ManifestResult<Option<Secret>> {
    find_typed(yaml, name)
}

/// Pod specs of every Deployment and StatefulSet that reference at least one
/// image pull secret.
///
/// Deployments come first, then StatefulSets; each group keeps document
/// order.
pub fn find_pod_specs_with_image_pull_secrets(yaml: &str) -> ManifestResult<Vec<PodSpec>> {
    let all = resources(yaml)?;
    let mut pod_specs = Vec::new();

    for resource in all
        .iter()
        .filter(|r| r.kind() == Some(ResourceKind::Deployment.as_str()))
    {
        let deployment: Deployment = resource.decode()?;
        if !deployment.pod_spec().image_pull_secrets.is_empty() {
            pod_specs.push(deployment.spec.template.spec);
        }
    }

    for resource in all
        .iter()
        .filter(|r| r.kind() == Some(ResourceKind::StatefulSet.as_str()))
    {
        let stateful_set: StatefulSet = resource.decode()?;
        if !stateful_set.pod_spec().image_pull_secrets.is_empty() {
            pod_specs.push(stateful_set.spec.template.spec);
        }
    }

    debug!("{} pod spec(s) carry image pull secrets", pod_specs.len());
    Ok(pod_specs)
}

/// Container of a Deployment by name.
pub fn deployment_container<'a>(deployment: &'a Deployment, name: &str) -> Option<&'a Container> {
    deployment.container(name)
}

/// Container of a StatefulSet by name.
pub fn stateful_set_container<'a>(
    stateful_set: &'a StatefulSet,
    name: &str,
) -> Option<&'a Container> {
    stateful_set.container(name)
}

/// Volume of a Deployment by name.
pub fn deployment_volume<'a>(deployment: &'a Deployment, name: &str) -> Option<&'a Volume> {
    deployment.volume(name)
}

/// Volume mount of a container by name.
pub fn container_volume_mount<'a>(container: &'a Container, name: &str) -> Option<&'a VolumeMount> {
    container.volume_mount(name)
}

/// All environment entries of a container.
pub fn container_env_values(container: &Container) -> &[EnvVar] {
    &container.env
}

/// Literal value of a container environment entry.
pub fn container_env_value<'a>(container: &'a Container, name: &str) -> Option<&'a str> {
    container.env_value(name)
}

/// Annotation value for an exact key.
pub fn find_annotation(metadata: &ObjectMeta, key: &str) -> Option<String> {
    metadata.annotation(key)
}

/// Values of every annotation whose key contains `fragment`.
pub fn find_annotations(metadata: &ObjectMeta, fragment: &str) -> Vec<String> {
    metadata.annotations_containing(fragment)
}

/// Parse a `KEY=value,KEY2=value2` assignment list.
///
/// Each segment splits on its first `=` and both halves are trimmed.
/// Segments without an `=` are dropped without complaint.
pub fn parse_env_string(env: &str) -> HashMap<String, String> {
    env.split(',')
        .filter_map(|segment| {
            let mut parts = segment.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) => Some((key.trim().to_string(), value.trim().to_string())),
                _ => None,
            }
        })
        .collect()
}

/// Parse an embedded YAML entry of a config map (e.g. `application.yaml`).
pub fn config_map_document(
    config_map: &ConfigMap,
    key: &str,
) -> ManifestResult<Option<ManifestDocument>> {
    config_map
        .entry(key)
        .map(parse_yaml_document)
        .transpose()
}

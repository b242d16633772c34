//! Multi-document YAML handling.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use crate::error::ManifestResult;

const DOCUMENT_SEPARATOR: &str = "---\n";

/// One document of a rendered stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    value: Value,
}

impl ManifestDocument {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// True for an empty document (`---` with no content).
    pub fn is_empty(&self) -> bool {
        self.value.is_null()
    }

    /// The document's `kind`, if it has one.
    pub fn kind(&self) -> Option<&str> {
        self.value.get("kind").and_then(Value::as_str)
    }

    /// The document's `metadata.name`, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.get("metadata.name").and_then(Value::as_str)
    }

    /// Nested value at a dot-separated path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        value_at_path(&self.value, path)
    }

    /// Decode into a structured type.
    pub fn decode<T: DeserializeOwned>(&self) -> ManifestResult<T> {
        Ok(serde_yaml::from_value(self.value.clone())?)
    }

    pub fn to_yaml_string(&self) -> ManifestResult<String> {
        Ok(serde_yaml::to_string(&self.value)?)
    }

    pub fn to_json(&self) -> ManifestResult<serde_json::Value> {
        Ok(serde_json::to_value(&self.value)?)
    }
}

/// Parse a multi-document stream.
///
/// Documents keep their stream order. A syntax error in any document fails
/// the whole parse.
pub fn parse_yaml_documents(yaml: &str) -> ManifestResult<Vec<ManifestDocument>> {
    let mut documents = Vec::new();

    if yaml.trim().is_empty() {
        return Ok(documents);
    }

    for document in serde_yaml::Deserializer::from_str(yaml) {
        let value = Value::deserialize(document)?;
        documents.push(ManifestDocument::new(value));
    }

    debug!("Parsed {} YAML document(s)", documents.len());
    Ok(documents)
}

/// Parse text that holds a single document, such as an embedded
/// `application.yaml`.
pub fn parse_yaml_document(yaml: &str) -> ManifestResult<ManifestDocument> {
    if yaml.trim().is_empty() {
        return Ok(ManifestDocument::new(Value::Null));
    }
    Ok(ManifestDocument::new(serde_yaml::from_str(yaml)?))
}

/// Serialize documents back into one stream.
pub fn join_documents(documents: &[ManifestDocument]) -> ManifestResult<String> {
    let mut out = String::new();
    for document in documents {
        out.push_str(DOCUMENT_SEPARATOR);
        out.push_str(&document.to_yaml_string()?);
    }
    Ok(out)
}

/// Walk a dot-separated path through mappings and sequences.
///
/// Sequence steps take a numeric index. Returns `None` as soon as a step does
/// not resolve.
pub fn value_at_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, segment| match current {
        Value::Mapping(map) => map.get(segment),
        Value::Sequence(seq) => segment.parse::<usize>().ok().and_then(|i| seq.get(i)),
        Value::Tagged(tagged) => value_at_path(&tagged.value, segment),
        _ => None,
    })
}

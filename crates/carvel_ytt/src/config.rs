//! Render and process configuration types.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Flag emitted once per template source.
pub const FILE_FLAG: &str = "--file";
/// Flag emitted once per scalar data value.
pub const DATA_VALUE_FLAG: &str = "--data-value";
/// Flag emitted once per YAML data value.
pub const DATA_VALUE_YAML_FLAG: &str = "--data-value-yaml";

/// Environment variable overriding the ytt executable.
pub const YTT_BINARY_ENV: &str = "YTT_BINARY";
/// Executable used when no override is configured.
pub const DEFAULT_YTT_BINARY: &str = "ytt";

/// Inputs for a single ytt render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YttOptions {
    /// Template files or directories
    #[serde(default)]
    pub files: Vec<String>,
    /// Scalar data values (`key=value`)
    #[serde(default)]
    pub data_values: Vec<String>,
    /// YAML-typed data values (`key=<yaml>`)
    #[serde(default)]
    pub data_value_yamls: Vec<String>,
}

impl YttOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    pub fn files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn data_value(mut self, assignment: impl Into<String>) -> Self {
        self.data_values.push(assignment.into());
        self
    }

    pub fn data_values<I, S>(mut self, assignments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_values
            .extend(assignments.into_iter().map(Into::into));
        self
    }

    pub fn data_value_yaml(mut self, assignment: impl Into<String>) -> Self {
        self.data_value_yamls.push(assignment.into());
        self
    }

    pub fn data_value_yamls<I, S>(mut self, assignments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_value_yamls
            .extend(assignments.into_iter().map(Into::into));
        self
    }

    /// Command line arguments in ytt's repeated-flag form.
    ///
    /// Files come first, then scalar values, then YAML values; each list keeps
    /// its own order.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(
            2 * (self.files.len() + self.data_values.len() + self.data_value_yamls.len()),
        );

        for file in &self.files {
            args.push(FILE_FLAG.to_string());
            args.push(file.clone());
        }

        for value in &self.data_values {
            args.push(DATA_VALUE_FLAG.to_string());
            args.push(value.clone());
        }

        for value in &self.data_value_yamls {
            args.push(DATA_VALUE_YAML_FLAG.to_string());
            args.push(value.clone());
        }

        args
    }
}

/// Process-level options for the ytt executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YttCliOptions {
    /// Executable name or path
    pub binary: PathBuf,
    /// Working directory for the child (inherits ours when unset)
    pub working_dir: Option<PathBuf>,
    /// Extra environment variables for the child
    pub env: HashMap<String, String>,
}

impl Default for YttCliOptions {
    fn default() -> Self {
        Self {
            binary: std::env::var_os(YTT_BINARY_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_YTT_BINARY)),
            working_dir: None,
            env: HashMap::new(),
        }
    }
}

impl YttCliOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

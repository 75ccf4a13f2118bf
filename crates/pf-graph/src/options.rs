//! Graph-construction options.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or parsing [`GraphOptions`].
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Failed to read options file: {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML options: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unrecognized value for stable unique names: {value:?} (expected ignore, warn or fail)")]
    UnrecognizedPolicy { value: String },
}

/// What to do when a requested transform name had to be made unique with a suffix.
///
/// Suffixed names depend on apply-call order, so a graph using them cannot be matched
/// back up by name later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum StableNamePolicy {
    /// Proceed silently.
    Ignore,
    /// Proceed and log a warning.
    #[default]
    Warn,
    /// Abort construction.
    Fail,
}

impl StableNamePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            StableNamePolicy::Ignore => "ignore",
            StableNamePolicy::Warn => "warn",
            StableNamePolicy::Fail => "fail",
        }
    }
}

impl fmt::Display for StableNamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StableNamePolicy {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" | "off" => Ok(StableNamePolicy::Ignore),
            "warn" | "warning" => Ok(StableNamePolicy::Warn),
            "fail" | "error" => Ok(StableNamePolicy::Fail),
            _ => Err(OptionsError::UnrecognizedPolicy {
                value: s.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for StableNamePolicy {
    type Error = OptionsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Options read once when a graph is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    pub stable_unique_names: StableNamePolicy,
}

impl GraphOptions {
    pub fn from_yaml_str(text: &str) -> Result<Self, OptionsError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load options from a file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    pub fn with_stable_unique_names(mut self, policy: StableNamePolicy) -> Self {
        self.stable_unique_names = policy;
        self
    }
}

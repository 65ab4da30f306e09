// ABOUTME: Package manifests as flattened dot-separated key/value sets.
// ABOUTME: Nested mappings join with '.', sequence items use their index.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use thiserror::Error;

pub const PACKAGE_MANIFEST_FILE: &str = "manifest.yml";

const PATH_SEP: char = '.';

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("reading {path} failed: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("manifest must be a mapping at the top level")]
    NotAMapping,

    #[error("unsupported key type under {parent:?}")]
    UnsupportedKey { parent: String },
}

/// A manifest reduced to leaf values keyed by their full path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatConfig {
    entries: BTreeMap<String, String>,
}

impl FlatConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        let root: Value = serde_yaml::from_str(yaml)?;
        let mut config = Self::default();
        match root {
            Value::Null => {}
            Value::Mapping(_) => config.flatten("", &root)?,
            _ => return Err(ManifestError::NotAMapping),
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    fn flatten(&mut self, prefix: &str, value: &Value) -> Result<(), ManifestError> {
        match value {
            Value::Null => {}
            Value::Bool(b) => self.insert(prefix, b.to_string()),
            Value::Number(n) => self.insert(prefix, n.to_string()),
            Value::String(s) => self.insert(prefix, s.clone()),
            Value::Sequence(items) => {
                for (idx, item) in items.iter().enumerate() {
                    self.flatten(&join(prefix, &idx.to_string()), item)?;
                }
            }
            Value::Mapping(map) => {
                for (key, item) in map {
                    let key = scalar_key(key).ok_or_else(|| ManifestError::UnsupportedKey {
                        parent: prefix.to_string(),
                    })?;
                    self.flatten(&join(prefix, &key), item)?;
                }
            }
            Value::Tagged(tagged) => self.flatten(prefix, &tagged.value)?,
        }
        Ok(())
    }

    fn insert(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    /// Flattened keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{PATH_SEP}{key}")
    }
}

fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => scalar_key(&tagged.value),
        _ => None,
    }
}

// ABOUTME: Application configuration and data-home locations.
// ABOUTME: Parses config.yml and derives the image references for a stack version.

mod locations;

pub use locations::{DATA_HOME_ENV, LocationManager};

use crate::types::{ImageRef, ParseImageRefError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

const ELASTIC_AGENT_REPOSITORY: &str = "docker.elastic.co/beats/elastic-agent-complete";
const ELASTICSEARCH_REPOSITORY: &str = "docker.elastic.co/elasticsearch/elasticsearch";
const KIBANA_REPOSITORY: &str = "docker.elastic.co/kibana/kibana";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot determine the home directory (HOME is not set)")]
    NoHomeDir,

    #[error("can't read application configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid application configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid image reference for stack version {version}: {source}")]
    ImageRef {
        version: String,
        #[source]
        source: ParseImageRefError,
    },
}

/// Contents of `<data home>/config.yml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub stack: StackConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StackConfig {
    /// Per stack version replacements for the default images.
    #[serde(default)]
    pub image_ref_overrides: HashMap<String, ImageRefOverrides>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRefOverrides {
    #[serde(rename = "elastic-agent", default)]
    pub elastic_agent: Option<ImageRef>,
    #[serde(default)]
    pub elasticsearch: Option<ImageRef>,
    #[serde(default)]
    pub kibana: Option<ImageRef>,
}

/// Images that make up a stack for one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRefs {
    pub elastic_agent: ImageRef,
    pub elasticsearch: ImageRef,
    pub kibana: ImageRef,
}

impl ImageRefs {
    /// Variables consumed by the profile's compose file, in a fixed order.
    pub fn as_env(&self) -> Vec<(String, String)> {
        vec![
            (
                "ELASTIC_AGENT_IMAGE_REF".to_string(),
                self.elastic_agent.to_string(),
            ),
            (
                "ELASTICSEARCH_IMAGE_REF".to_string(),
                self.elasticsearch.to_string(),
            ),
            ("KIBANA_IMAGE_REF".to_string(), self.kibana.to_string()),
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRef> {
        [&self.elastic_agent, &self.elasticsearch, &self.kibana].into_iter()
    }
}

impl AppConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load `config.yml`; a missing file yields the defaults.
    pub fn load(locations: &LocationManager) -> Result<Self, ConfigError> {
        let path = locations.config_file();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no application configuration at {}", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn stack_image_refs(&self, version: &str) -> Result<ImageRefs, ConfigError> {
        let image_error = |source: ParseImageRefError| ConfigError::ImageRef {
            version: version.to_string(),
            source,
        };
        let default_ref =
            |repository: &str| ImageRef::versioned(repository, version).map_err(image_error);
        let overrides = self.stack.image_ref_overrides.get(version);
        let pick = |over: Option<&ImageRef>, repository: &str| match over {
            Some(image) => Ok(image.clone()),
            None => default_ref(repository),
        };

        Ok(ImageRefs {
            elastic_agent: pick(
                overrides.and_then(|o| o.elastic_agent.as_ref()),
                ELASTIC_AGENT_REPOSITORY,
            )?,
            elasticsearch: pick(
                overrides.and_then(|o| o.elasticsearch.as_ref()),
                ELASTICSEARCH_REPOSITORY,
            )?,
            kibana: pick(overrides.and_then(|o| o.kibana.as_ref()), KIBANA_REPOSITORY)?,
        })
    }
}

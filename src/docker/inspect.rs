// ABOUTME: Typed views over `docker inspect` and `docker network inspect` JSON.
// ABOUTME: Decoding ignores unknown fields and defaults missing optional ones.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use snafu::ResultExt;

use super::error::{DecodeSnafu, DockerError};
use crate::process::CommandOutput;
use crate::types::ContainerId;

/// A docker network and the containers currently attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescription {
    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Id", default)]
    pub id: String,

    /// Attached containers keyed by container ID.
    #[serde(rename = "Containers", default, deserialize_with = "null_as_default")]
    pub containers: BTreeMap<String, NetworkContainer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkContainer {
    #[serde(rename = "Name", default)]
    pub name: String,
}

impl NetworkDescription {
    /// Name of an attached container, if `container` is attached.
    pub fn container_name(&self, container: &ContainerId) -> Option<&str> {
        self.containers
            .get(container.as_str())
            .map(|c| c.name.as_str())
    }
}

/// A container as reported by `docker inspect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerDescription {
    #[serde(rename = "Id", default)]
    pub id: ContainerId,

    #[serde(rename = "State", default)]
    pub state: ContainerState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerState {
    #[serde(rename = "Status", default)]
    pub status: String,

    #[serde(rename = "ExitCode", default)]
    pub exit_code: i64,

    #[serde(rename = "Health", default, skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthState {
    #[serde(rename = "Status", default)]
    pub status: String,

    /// Health check runs, oldest first.
    #[serde(rename = "Log", default, deserialize_with = "null_as_default")]
    pub log: Vec<HealthLogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthLogEntry {
    #[serde(rename = "Start", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,

    #[serde(rename = "ExitCode", default)]
    pub exit_code: i64,

    #[serde(rename = "Output", default)]
    pub output: String,
}

impl ContainerDescription {
    pub fn is_running(&self) -> bool {
        self.state.status == "running"
    }

    /// Health status, or `None` for containers without a health check.
    pub fn health_status(&self) -> Option<&str> {
        self.state.health.as_ref().map(|h| h.status.as_str())
    }

    /// Output of the most recent health check run.
    pub fn last_health_output(&self) -> Option<&str> {
        self.state
            .health
            .as_ref()
            .and_then(|h| h.log.last())
            .map(|entry| entry.output.as_str())
    }
}

impl fmt::Display for ContainerDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("error: can't marshal container description"),
        }
    }
}

pub fn decode_containers(output: &CommandOutput) -> Result<Vec<ContainerDescription>, DockerError> {
    decode(output, "container inspect")
}

pub fn decode_networks(output: &CommandOutput) -> Result<Vec<NetworkDescription>, DockerError> {
    decode(output, "network inspect")
}

fn decode<T: DeserializeOwned>(
    output: &CommandOutput,
    what: &'static str,
) -> Result<Vec<T>, DockerError> {
    serde_json::from_slice(&output.stdout).context(DecodeSnafu {
        what,
        stderr: output.stderr.clone(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

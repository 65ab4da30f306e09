// ABOUTME: Docker client errors with SNAFU context selectors.
// ABOUTME: Each variant names the docker step that failed and wraps the cause.

use snafu::Snafu;

use crate::process::ExecError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DockerError {
    #[snafu(display("could not pull image {image}: {source}"))]
    Pull { image: String, source: ExecError },

    #[snafu(display("could not find \"{name}\" container: {source}"))]
    ContainerLookup { name: String, source: ExecError },

    #[snafu(display("expected single {name} container, found {count}"))]
    AmbiguousContainer { name: String, count: usize },

    #[snafu(display("could not inspect network {network}: {source}"))]
    InspectNetwork { network: String, source: ExecError },

    #[snafu(display("could not attach container {container} to network {network}: {source}"))]
    ConnectNetwork {
        container: String,
        network: String,
        source: ExecError,
    },

    #[snafu(display("could not create network {name}: {source}"))]
    CreateNetwork { name: String, source: ExecError },

    #[snafu(display("could not remove network {name}: {source}"))]
    RemoveNetwork { name: String, source: ExecError },

    #[snafu(display("could not inspect containers: {source}"))]
    InspectContainers { source: ExecError },

    #[snafu(display("could not copy files from the container: {source}"))]
    Copy { source: ExecError },

    #[snafu(display("docker swarm init failed: {source}"))]
    SwarmInit { source: ExecError },

    #[snafu(display("unable to get join token: {source}"))]
    JoinToken { source: ExecError },

    #[snafu(display("docker swarm leave failed: {source}"))]
    SwarmLeave { source: ExecError },

    #[snafu(display("docker stack rm {stack} failed: {source}"))]
    StackRemove { stack: String, source: ExecError },

    #[snafu(display("docker stack deploy {stack} failed: {source}"))]
    StackDeploy { stack: String, source: ExecError },

    #[snafu(display("docker compose {action} failed: {source}"))]
    Compose {
        action: &'static str,
        source: ExecError,
    },

    #[snafu(display("can't unmarshal {what} (stderr={stderr:?}): {source}"))]
    Decode {
        what: &'static str,
        stderr: String,
        source: serde_json::Error,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockerErrorKind {
    /// The docker binary could not run or exited non-zero.
    Execution,
    /// Inspection output did not have the expected JSON shape.
    Decode,
    /// Output was well-formed but not what the caller required.
    UnexpectedOutput,
}

impl DockerError {
    pub fn kind(&self) -> DockerErrorKind {
        match self {
            DockerError::Decode { .. } => DockerErrorKind::Decode,
            DockerError::AmbiguousContainer { .. } => DockerErrorKind::UnexpectedOutput,
            _ => DockerErrorKind::Execution,
        }
    }

    /// The failed command's exit error, if the failure came from running docker.
    pub fn exec_error(&self) -> Option<&ExecError> {
        match self {
            DockerError::Pull { source, .. }
            | DockerError::ContainerLookup { source, .. }
            | DockerError::InspectNetwork { source, .. }
            | DockerError::ConnectNetwork { source, .. }
            | DockerError::CreateNetwork { source, .. }
            | DockerError::RemoveNetwork { source, .. }
            | DockerError::InspectContainers { source }
            | DockerError::Copy { source }
            | DockerError::SwarmInit { source }
            | DockerError::JoinToken { source }
            | DockerError::SwarmLeave { source }
            | DockerError::StackRemove { source, .. }
            | DockerError::StackDeploy { source, .. }
            | DockerError::Compose { source, .. } => Some(source),
            DockerError::AmbiguousContainer { .. } | DockerError::Decode { .. } => None,
        }
    }
}

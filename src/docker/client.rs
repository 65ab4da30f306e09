// ABOUTME: Docker subcommand wrappers over a CommandRunner.
// ABOUTME: Builds argument lists, runs them, and attaches the failing step as context.

use std::path::Path;

use snafu::ResultExt;

use super::error::*;
use super::inspect::{ContainerDescription, NetworkDescription, decode_containers, decode_networks};
use crate::process::{CommandOutput, CommandRunner, ExecError, Invocation, ProcessRunner};
use crate::types::{ContainerId, ImageRef, InterfaceName, NetworkId, StackName};

/// `docker compose` operations used for non-swarm stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeAction {
    Build,
    Up,
    Down,
}

impl ComposeAction {
    pub fn name(&self) -> &'static str {
        match self {
            ComposeAction::Build => "build",
            ComposeAction::Up => "up",
            ComposeAction::Down => "down",
        }
    }

    fn args(&self) -> &'static [&'static str] {
        match self {
            ComposeAction::Build => &["build"],
            ComposeAction::Up => &["up", "-d"],
            ComposeAction::Down => &["down"],
        }
    }
}

/// Thin client for the `docker` binary.
#[derive(Debug, Clone)]
pub struct Docker<R = ProcessRunner> {
    runner: R,
}

impl<R: CommandRunner> Docker<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    async fn exec(&self, invocation: Invocation) -> Result<CommandOutput, ExecError> {
        self.runner.exec(&invocation).await
    }

    /// Download the latest revision of an image.
    pub async fn pull(&self, image: &ImageRef) -> Result<(), DockerError> {
        let image = image.to_string();
        self.exec(Invocation::new(["pull", image.as_str()]))
            .await
            .context(PullSnafu { image })?;
        Ok(())
    }

    /// Resolve the ID of the single running container whose name matches.
    pub async fn container_id(&self, name: &str) -> Result<ContainerId, DockerError> {
        let filter = format!("name={name}");
        let output = self
            .exec(Invocation::new(["ps", "--filter", filter.as_str(), "--format", "{{.ID}}"]))
            .await
            .context(ContainerLookupSnafu { name })?;

        let stdout = output.stdout_lossy();
        let ids: Vec<&str> = stdout.trim().lines().collect();
        match ids.as_slice() {
            [id] if !id.is_empty() => Ok(ContainerId::new(*id)),
            _ => AmbiguousContainerSnafu {
                name,
                count: ids.iter().filter(|id| !id.is_empty()).count(),
            }
            .fail(),
        }
    }

    pub async fn inspect_network(
        &self,
        network: &NetworkId,
    ) -> Result<Vec<NetworkDescription>, DockerError> {
        let output = self
            .exec(Invocation::new(["network", "inspect", network.as_str()]))
            .await
            .context(InspectNetworkSnafu {
                network: network.as_str(),
            })?;
        decode_networks(&output)
    }

    pub async fn connect_to_network(
        &self,
        container: &ContainerId,
        network: &NetworkId,
    ) -> Result<(), DockerError> {
        self.exec(Invocation::new([
            "network",
            "connect",
            network.as_str(),
            container.as_str(),
        ]))
        .await
        .context(ConnectNetworkSnafu {
            container: container.as_str(),
            network: network.as_str(),
        })?;
        Ok(())
    }

    /// `docker network create --driver <driver> [extra_args...] <name>`
    pub async fn create_network(
        &self,
        name: &str,
        driver: &str,
        extra_args: &[String],
    ) -> Result<NetworkId, DockerError> {
        let mut args = vec![
            "network".to_string(),
            "create".to_string(),
            "--driver".to_string(),
            driver.to_string(),
        ];
        args.extend(extra_args.iter().cloned());
        args.push(name.to_string());

        self.exec(Invocation::new(args))
            .await
            .context(CreateNetworkSnafu { name })?;
        Ok(NetworkId::new(name))
    }

    pub async fn remove_network(&self, network: &NetworkId) -> Result<(), DockerError> {
        self.exec(Invocation::new(["network", "rm", network.as_str()]))
            .await
            .context(RemoveNetworkSnafu {
                name: network.as_str(),
            })?;
        Ok(())
    }

    /// Inspect containers. An empty ID list returns nothing without calling docker.
    pub async fn inspect_containers(
        &self,
        ids: &[ContainerId],
    ) -> Result<Vec<ContainerDescription>, DockerError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let args = std::iter::once("inspect").chain(ids.iter().map(ContainerId::as_str));
        let output = self
            .exec(Invocation::new(args))
            .await
            .context(InspectContainersSnafu)?;
        decode_containers(&output)
    }

    /// Copy `container_path` out of a container into `local_path`.
    pub async fn copy(
        &self,
        container: &str,
        container_path: &str,
        local_path: &Path,
    ) -> Result<(), DockerError> {
        let source = format!("{container}:{container_path}");
        let target = local_path.to_string_lossy();
        self.exec(Invocation::new(["cp", source.as_str(), &*target]))
            .await
            .context(CopySnafu)?;
        Ok(())
    }

    pub async fn swarm_init(&self, advertise: &InterfaceName) -> Result<(), DockerError> {
        self.exec(Invocation::new([
            "swarm",
            "init",
            "--advertise-addr",
            advertise.as_str(),
        ]))
        .await
        .context(SwarmInitSnafu)?;
        Ok(())
    }

    /// Instructions (including the token) for joining the swarm as a worker.
    pub async fn swarm_join_token(&self) -> Result<String, DockerError> {
        let output = self
            .exec(Invocation::new(["swarm", "join-token", "worker"]))
            .await
            .context(JoinTokenSnafu)?;
        Ok(output.stdout_lossy())
    }

    pub async fn swarm_leave(&self) -> Result<(), DockerError> {
        self.exec(Invocation::new(["swarm", "leave", "--force"]))
            .await
            .context(SwarmLeaveSnafu)?;
        Ok(())
    }

    pub async fn stack_remove(&self, stack: &StackName) -> Result<(), DockerError> {
        self.exec(Invocation::new(["stack", "rm", stack.as_str()]))
            .await
            .context(StackRemoveSnafu {
                stack: stack.as_str(),
            })?;
        Ok(())
    }

    /// `docker stack deploy`, with `env` appended to the inherited environment.
    pub async fn stack_deploy(
        &self,
        compose_file: &Path,
        stack: &StackName,
        env: Vec<(String, String)>,
    ) -> Result<(), DockerError> {
        let compose_file = compose_file.to_string_lossy();
        let invocation = Invocation::new([
            "stack",
            "deploy",
            "--compose-file",
            &*compose_file,
            stack.as_str(),
        ])
        .with_env(env);

        self.exec(invocation).await.context(StackDeploySnafu {
            stack: stack.as_str(),
        })?;
        Ok(())
    }

    /// `docker compose -f <file> -p <project> <action>`
    pub async fn compose(
        &self,
        compose_file: &Path,
        project: &StackName,
        action: ComposeAction,
        env: Vec<(String, String)>,
    ) -> Result<(), DockerError> {
        let compose_file = compose_file.to_string_lossy();
        let args = ["compose", "-f", &*compose_file, "-p", project.as_str()]
            .into_iter()
            .chain(action.args().iter().copied());

        self.exec(Invocation::new(args).with_env(env))
            .await
            .context(ComposeSnafu {
                action: action.name(),
            })?;
        Ok(())
    }
}

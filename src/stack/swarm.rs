// ABOUTME: Swarm lifecycle: init with an overlay network, leave, stack teardown.
// ABOUTME: Init records undo steps and rolls them back if a later step fails.

use snafu::{ResultExt, Snafu};

use super::compensation::{Compensation, Compensations};
use crate::diagnostics::Diagnostics;
use crate::docker::{Docker, DockerError};
use crate::error::ErrorKind;
use crate::process::{CommandRunner, ProcessRunner};
use crate::profile::{
    CreateProfileOptions, DEFAULT_PROFILE, Profile, ProfileError, Profiles, SWARM_PROFILE,
};
use crate::types::{InterfaceName, InterfaceNameError, NetworkId, StackName, Subnet, SubnetError};

const OVERLAY_DRIVER: &str = "overlay";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SwarmError {
    #[snafu(display("cannot create docker swarm without overlay network interface: {source}"))]
    Interface { source: InterfaceNameError },

    #[snafu(display("create overlay network failed: {source}"))]
    InvalidSubnet { source: SubnetError },

    #[snafu(display("swarm profile creation has failed: {source}"))]
    SwarmProfile { source: ProfileError },

    #[snafu(display("docker swarm creation has failed: {source}"))]
    Init { source: DockerError },

    #[snafu(display("cannot initialize swarm: {source}"))]
    OverlayNetwork { source: DockerError },

    #[snafu(display("{source}"))]
    Leave { source: DockerError },

    #[snafu(display("creating network {name} failed: {source}"))]
    Network { name: String, source: DockerError },

    #[snafu(display("taking down the stack failed: {source}"))]
    StackDown { source: DockerError },
}

impl SwarmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SwarmError::Interface { .. } | SwarmError::InvalidSubnet { .. } => ErrorKind::Validation,
            SwarmError::SwarmProfile { .. } => ErrorKind::Filesystem,
            SwarmError::Init { source }
            | SwarmError::OverlayNetwork { source }
            | SwarmError::Leave { source }
            | SwarmError::Network { source, .. }
            | SwarmError::StackDown { source } => ErrorKind::from(source.kind()),
        }
    }
}

/// Validated inputs for [`SwarmLifecycle::init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwarmInitPlan {
    interface: InterfaceName,
    subnet: Subnet,
    overlay_network: String,
}

impl SwarmInitPlan {
    pub fn new(interface: InterfaceName, subnet: Subnet, overlay_network: impl Into<String>) -> Self {
        Self {
            interface,
            subnet,
            overlay_network: overlay_network.into(),
        }
    }

    /// Parse raw flag values, requiring the interface to exist on this host.
    pub fn resolve(interface: &str, subnet: &str, overlay_network: &str) -> Result<Self, SwarmError> {
        let interface = InterfaceName::lookup(interface).context(InterfaceSnafu)?;
        let subnet = Subnet::parse(subnet).context(InvalidSubnetSnafu)?;
        Ok(Self::new(interface, subnet, overlay_network))
    }

    pub fn interface(&self) -> &InterfaceName {
        &self.interface
    }

    pub fn subnet(&self) -> &Subnet {
        &self.subnet
    }

    pub fn overlay_network(&self) -> &str {
        &self.overlay_network
    }
}

/// Result of a successful swarm init.
#[derive(Debug, Clone)]
pub struct SwarmInitialized {
    /// `docker swarm join-token worker` output, for joining other hosts.
    pub join_token: String,
    pub network: NetworkId,
    pub profile: Profile,
}

pub struct SwarmLifecycle<R = ProcessRunner> {
    docker: Docker<R>,
    profiles: Profiles,
}

impl<R: CommandRunner> SwarmLifecycle<R> {
    pub fn new(docker: Docker<R>, profiles: Profiles) -> Self {
        Self { docker, profiles }
    }

    pub fn docker(&self) -> &Docker<R> {
        &self.docker
    }

    /// Create the swarm profile, init the swarm and create the overlay network.
    ///
    /// If any docker step fails, the steps already applied are undone in
    /// reverse order before the error is returned. Failures while undoing
    /// end up in `diagnostics`.
    pub async fn init(
        &self,
        plan: &SwarmInitPlan,
        diagnostics: &mut Diagnostics,
    ) -> Result<SwarmInitialized, SwarmError> {
        let profile = self
            .profiles
            .create(&CreateProfileOptions {
                name: SWARM_PROFILE.to_string(),
                from_profile: DEFAULT_PROFILE.to_string(),
                overwrite_existing: true,
            })
            .context(SwarmProfileSnafu)?;

        let mut undo = Compensations::new();
        match self.init_swarm(plan, &mut undo).await {
            Ok((join_token, network)) => {
                undo.commit();
                Ok(SwarmInitialized {
                    join_token,
                    network,
                    profile,
                })
            }
            Err(e) => {
                tracing::warn!("swarm init failed: {e}");
                undo.unwind(&self.docker, diagnostics).await;
                Err(e)
            }
        }
    }

    async fn init_swarm(
        &self,
        plan: &SwarmInitPlan,
        undo: &mut Compensations,
    ) -> Result<(String, NetworkId), SwarmError> {
        self.docker
            .swarm_init(&plan.interface)
            .await
            .context(InitSnafu)?;
        undo.push(Compensation::LeaveSwarm);

        let join_token = self.docker.swarm_join_token().await.context(InitSnafu)?;

        let network = self
            .overlay(&plan.overlay_network, &plan.subnet)
            .await
            .context(OverlayNetworkSnafu)?;
        undo.push(Compensation::RemoveNetwork(network.clone()));

        Ok((join_token, network))
    }

    /// Force this node out of the swarm.
    pub async fn leave(&self) -> Result<(), SwarmError> {
        self.docker.swarm_leave().await.context(LeaveSnafu)
    }

    pub async fn create_network(
        &self,
        name: &str,
        driver: &str,
        extra_args: &[String],
    ) -> Result<NetworkId, SwarmError> {
        self.docker
            .create_network(name, driver, extra_args)
            .await
            .context(NetworkSnafu { name })
    }

    /// Create an attachable overlay network. The subnet is validated before
    /// docker is invoked.
    pub async fn create_overlay_network(
        &self,
        name: &str,
        subnet: &str,
    ) -> Result<NetworkId, SwarmError> {
        let subnet = Subnet::parse(subnet).context(InvalidSubnetSnafu)?;
        self.overlay(name, &subnet)
            .await
            .context(NetworkSnafu { name })
    }

    async fn overlay(&self, name: &str, subnet: &Subnet) -> Result<NetworkId, DockerError> {
        let args = [
            "--subnet".to_string(),
            subnet.to_string(),
            "--attachable".to_string(),
        ];
        self.docker.create_network(name, OVERLAY_DRIVER, &args).await
    }

    pub async fn stack_down(&self, stack: &StackName) -> Result<(), SwarmError> {
        self.docker.stack_remove(stack).await.context(StackDownSnafu)
    }
}

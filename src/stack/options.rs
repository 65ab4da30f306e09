// ABOUTME: Per-command deployment options and their defaults.
// ABOUTME: Built once from CLI flags and passed to the deployer.

use crate::profile::Profile;
use crate::types::StackName;

pub const DEFAULT_STACK_VERSION: &str = "7.14.0-SNAPSHOT";
pub const DEFAULT_STACK_NAME: &str = "elastic-package-stack";
pub const DEFAULT_OVERLAY_NETWORK: &str = "elastic-package-stack-overlay";

#[derive(Debug, Clone)]
pub struct DeploymentOptions {
    /// Deploy with `docker stack` instead of `docker compose`.
    pub swarm_mode: bool,
    pub stack_name: StackName,
    pub stack_version: String,
    pub profile: Profile,
}

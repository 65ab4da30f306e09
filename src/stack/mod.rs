// ABOUTME: Stack lifecycle: swarm setup and teardown, stack deployment.
// ABOUTME: Sequences docker invocations and undoes completed steps on failure.

mod compensation;
mod deploy;
mod env;
mod options;
mod swarm;

pub use compensation::{Compensation, Compensations};
pub use deploy::{DeployError, DeploySummary, StackDeployer};
pub use env::{EnvBuilder, deployment_env, stack_variant_as_env};
pub use options::{
    DEFAULT_OVERLAY_NETWORK, DEFAULT_STACK_NAME, DEFAULT_STACK_VERSION, DeploymentOptions,
};
pub use swarm::{SwarmError, SwarmInitPlan, SwarmInitialized, SwarmLifecycle};

// ABOUTME: Docker CLI client built on the process runner.
// ABOUTME: Exposes one method per docker subcommand used by stack tooling.

mod client;
mod error;
mod inspect;

pub use client::{ComposeAction, Docker};
pub use error::{DockerError, DockerErrorKind};
pub use inspect::{
    ContainerDescription, ContainerState, HealthLogEntry, HealthState, NetworkContainer,
    NetworkDescription, decode_containers, decode_networks,
};

// ABOUTME: Undo actions for multi-step docker operations.
// ABOUTME: Recorded as steps succeed and run newest first when a later step fails.

use std::fmt;

use crate::diagnostics::{Diagnostics, Warning};
use crate::docker::{Docker, DockerError};
use crate::process::CommandRunner;
use crate::types::NetworkId;

/// An action that reverses one completed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensation {
    /// Undoes `swarm init`.
    LeaveSwarm,
    /// Undoes `network create`.
    RemoveNetwork(NetworkId),
}

impl Compensation {
    async fn run<R: CommandRunner>(&self, docker: &Docker<R>) -> Result<(), DockerError> {
        match self {
            Compensation::LeaveSwarm => docker.swarm_leave().await,
            Compensation::RemoveNetwork(network) => docker.remove_network(network).await,
        }
    }
}

impl fmt::Display for Compensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compensation::LeaveSwarm => f.write_str("leave swarm"),
            Compensation::RemoveNetwork(network) => write!(f, "remove network {network}"),
        }
    }
}

/// Pending compensations for an operation in progress.
#[derive(Debug, Default)]
pub struct Compensations {
    actions: Vec<Compensation>,
}

impl Compensations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Compensation) {
        tracing::debug!("registered compensation: {action}");
        self.actions.push(action);
    }

    pub fn pending(&self) -> &[Compensation] {
        &self.actions
    }

    /// The operation completed; nothing will be undone.
    pub fn commit(self) {
        tracing::debug!("committed {} step(s)", self.actions.len());
    }

    /// Run every pending compensation, newest first.
    ///
    /// A failing compensation is recorded as a warning and the rest still run.
    pub async fn unwind<R: CommandRunner>(self, docker: &Docker<R>, diagnostics: &mut Diagnostics) {
        for action in self.actions.into_iter().rev() {
            tracing::info!("rolling back: {action}");
            if let Err(e) = action.run(docker).await {
                diagnostics.warn(Warning::compensation_failed(format!(
                    "rollback step '{action}' failed: {e}"
                )));
            }
        }
    }
}

// ABOUTME: Application-wide error type for elastic-package commands.
// ABOUTME: Wraps module errors and classifies them for programmatic handling.

use thiserror::Error;

use crate::config::ConfigError;
use crate::docker::{DockerError, DockerErrorKind};
use crate::packages::{ProjectError, QueryError};
use crate::profile::ProfileError;
use crate::stack::{DeployError, SwarmError};
use crate::types::StackNameError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Docker(#[from] DockerError),

    #[error(transparent)]
    Swarm(#[from] SwarmError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("invalid stack name: {0}")]
    StackName(#[from] StackNameError),

    #[error("{name} is not a valid profile, known profiles are: {known}")]
    UnknownProfile { name: String, known: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An external command could not run or exited non-zero.
    Execution,
    /// Command output could not be decoded.
    Decode,
    /// User input was rejected before anything ran.
    Validation,
    Filesystem,
    Configuration,
}

impl From<DockerErrorKind> for ErrorKind {
    fn from(kind: DockerErrorKind) -> Self {
        match kind {
            DockerErrorKind::Execution | DockerErrorKind::UnexpectedOutput => ErrorKind::Execution,
            DockerErrorKind::Decode => ErrorKind::Decode,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Configuration,
            Error::Docker(e) => e.kind().into(),
            Error::Swarm(e) => e.kind(),
            Error::Deploy(e) => e.kind(),
            Error::Profile(ProfileError::InvalidName(_)) => ErrorKind::Validation,
            Error::Profile(_) | Error::Io(_) => ErrorKind::Filesystem,
            Error::Project(ProjectError::NotProjectRoot) => ErrorKind::Validation,
            Error::Project(_) => ErrorKind::Filesystem,
            Error::Query(QueryError::ReadRoot { .. }) => ErrorKind::Filesystem,
            Error::Query(_) | Error::StackName(_) | Error::UnknownProfile { .. } => {
                ErrorKind::Validation
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

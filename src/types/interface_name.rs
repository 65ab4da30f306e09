// ABOUTME: Host network interface names used to advertise the swarm.
// ABOUTME: Syntax is checked locally, existence through the OS interface index.

use std::fmt;
use thiserror::Error;

/// Linux IFNAMSIZ minus the trailing NUL.
const MAX_INTERFACE_NAME_LEN: usize = 15;

#[derive(Debug, Error)]
pub enum InterfaceNameError {
    #[error("network interface name cannot be empty")]
    Empty,

    #[error("network interface name exceeds {MAX_INTERFACE_NAME_LEN} bytes: {0}")]
    TooLong(String),

    #[error("invalid character in network interface name: '{0}'")]
    InvalidChar(char),

    #[error("network interface {name} not found: {source}")]
    NotFound {
        name: String,
        #[source]
        source: nix::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceName(String);

impl InterfaceName {
    /// Validate the name without consulting the OS.
    pub fn new(value: &str) -> Result<Self, InterfaceNameError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(InterfaceNameError::Empty);
        }

        if trimmed.len() > MAX_INTERFACE_NAME_LEN {
            return Err(InterfaceNameError::TooLong(trimmed.to_string()));
        }

        if let Some(c) = trimmed
            .chars()
            .find(|c| *c == '/' || *c == ':' || c.is_whitespace() || c.is_control())
        {
            return Err(InterfaceNameError::InvalidChar(c));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Validate the name and require that the interface exists on this host.
    pub fn lookup(value: &str) -> Result<Self, InterfaceNameError> {
        let name = Self::new(value)?;
        nix::net::if_::if_nametoindex(name.as_str()).map_err(|source| {
            InterfaceNameError::NotFound {
                name: name.0.clone(),
                source,
            }
        })?;
        Ok(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

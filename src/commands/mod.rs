// ABOUTME: Command handlers for the elastic-package CLI.
// ABOUTME: Shared context wires the docker runner and data-home locations.

mod profiles;
mod query;
mod stack;
mod swarm;

pub use profiles::profiles;
pub use query::query;
pub use stack::stack;

use elastic_package::config::LocationManager;
use elastic_package::docker::Docker;
use elastic_package::error::{Error, Result};
use elastic_package::process::{ProcessRunner, RunnerConfig};
use elastic_package::profile::{Profile, ProfileError, Profiles};

/// Per-invocation dependencies shared by command handlers.
pub struct Context {
    pub locations: LocationManager,
    pub runner: RunnerConfig,
}

impl Context {
    pub fn new(verbose: bool) -> Result<Self> {
        Ok(Self {
            locations: LocationManager::new()?,
            runner: RunnerConfig { debug: verbose },
        })
    }

    pub fn docker(&self) -> Docker {
        Docker::new(ProcessRunner::docker(self.runner))
    }

    pub fn profiles(&self) -> Profiles {
        Profiles::new(&self.locations)
    }

    /// Load a profile, creating the default one on first use. Unknown
    /// names are reported together with the profiles that do exist.
    pub fn load_profile(&self, name: &str) -> Result<Profile> {
        let profiles = self.profiles();
        profiles.ensure_default()?;
        match profiles.load(name) {
            Ok(profile) => Ok(profile),
            Err(ProfileError::NotAProfile(_)) => {
                let known = profiles
                    .list()?
                    .into_iter()
                    .map(|p| p.name)
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(Error::UnknownProfile {
                    name: name.to_string(),
                    known,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

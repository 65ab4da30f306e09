// ABOUTME: Filesystem layout of the tool's data home.
// ABOUTME: Resolves profiles, stack and packages directories under one root.

use std::path::{Path, PathBuf};

use super::ConfigError;

/// Overrides the data home (default `$HOME/.elastic-package`).
pub const DATA_HOME_ENV: &str = "ELASTIC_PACKAGE_DATA_HOME";

const DATA_HOME_DIR: &str = ".elastic-package";
const PROFILES_DIR: &str = "profiles";
const STACK_DIR: &str = "stack";
const PACKAGES_DIR: &str = "development";
const CONFIG_FILE: &str = "config.yml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationManager {
    root: PathBuf,
}

impl LocationManager {
    /// Resolve the data home from the environment.
    pub fn new() -> Result<Self, ConfigError> {
        if let Some(root) = std::env::var_os(DATA_HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(root));
        }
        let home = std::env::var_os("HOME")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::with_root(PathBuf::from(home).join(DATA_HOME_DIR)))
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn profile_dir(&self) -> PathBuf {
        self.root.join(PROFILES_DIR)
    }

    pub fn stack_dir(&self) -> PathBuf {
        self.root.join(STACK_DIR)
    }

    /// Packages served by the stack's package registry.
    pub fn packages_dir(&self) -> PathBuf {
        self.stack_dir().join(PACKAGES_DIR)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted() {
        let locations = LocationManager::with_root("/data");
        assert_eq!(locations.profile_dir(), Path::new("/data/profiles"));
        assert_eq!(locations.packages_dir(), Path::new("/data/stack/development"));
        assert_eq!(locations.config_file(), Path::new("/data/config.yml"));
    }

    #[test]
    fn env_override_wins_over_home() {
        temp_env::with_vars(
            [(DATA_HOME_ENV, Some("/custom")), ("HOME", Some("/home/dev"))],
            || {
                let locations = LocationManager::new().unwrap();
                assert_eq!(locations.root(), Path::new("/custom"));
            },
        );
    }

    #[test]
    fn defaults_under_home() {
        temp_env::with_vars(
            [(DATA_HOME_ENV, None::<&str>), ("HOME", Some("/home/dev"))],
            || {
                let locations = LocationManager::new().unwrap();
                assert_eq!(locations.root(), Path::new("/home/dev/.elastic-package"));
            },
        );
    }
}

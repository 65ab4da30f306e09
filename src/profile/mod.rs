// ABOUTME: Named stack profiles stored under the data home.
// ABOUTME: Creates profiles from the built-in default, loads and lists them.

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LocationManager;
use crate::files::{self, FilesError};

pub const DEFAULT_PROFILE: &str = "default";
pub const SWARM_PROFILE: &str = "swarm";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("{0} is not a profile")]
    NotAProfile(String),

    #[error("profile {0} already exists")]
    AlreadyExists(String),

    #[error("profile {0} cannot be created from itself")]
    SelfCopy(String),

    #[error("invalid profile name: {0:?}")]
    InvalidName(String),

    #[error("profile I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid profile metadata in {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("copying profile files failed: {0}")]
    Copy(#[from] FilesError),
}

/// Files a profile is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFile {
    /// Compose file deployed by `stack up`.
    SnapshotFile,
    PackageRegistryDockerfile,
    Metadata,
}

impl ProfileFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            ProfileFile::SnapshotFile => "snapshot.yml",
            ProfileFile::PackageRegistryDockerfile => "Dockerfile.package-registry",
            ProfileFile::Metadata => "profile.json",
        }
    }
}

/// Contents of `profile.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub user: String,
    pub version: String,
}

impl ProfileMetadata {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            date_created: Utc::now(),
            user: std::env::var("USER").unwrap_or_else(|_| "unknown".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// A loaded profile directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    path: PathBuf,
}

impl Profile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fetch_path(&self, file: ProfileFile) -> PathBuf {
        self.path.join(file.file_name())
    }

    /// Variables the profile contributes to compose/stack commands.
    pub fn compose_env_vars(&self) -> Vec<(String, String)> {
        vec![("PROFILE_NAME".to_string(), self.name.clone())]
    }

    pub fn metadata(&self) -> Result<ProfileMetadata, ProfileError> {
        read_metadata(&self.fetch_path(ProfileFile::Metadata))
    }
}

#[derive(Debug, Clone)]
pub struct CreateProfileOptions {
    pub name: String,
    pub from_profile: String,
    pub overwrite_existing: bool,
}

/// Profile store rooted at `<data home>/profiles`.
#[derive(Debug, Clone)]
pub struct Profiles {
    root: PathBuf,
}

impl Profiles {
    pub fn new(locations: &LocationManager) -> Self {
        Self {
            root: locations.profile_dir(),
        }
    }

    fn profile_path(&self, name: &str) -> Result<PathBuf, ProfileError> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
            || name.chars().any(char::is_whitespace)
        {
            return Err(ProfileError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }

    /// Create (or with `overwrite_existing`, replace) a profile.
    ///
    /// The default profile is always generated from the built-in templates;
    /// any other profile is a copy of `from_profile` with fresh metadata.
    pub fn create(&self, options: &CreateProfileOptions) -> Result<Profile, ProfileError> {
        let target = self.profile_path(&options.name)?;
        if target.join(ProfileFile::Metadata.file_name()).exists() && !options.overwrite_existing
        {
            return Err(ProfileError::AlreadyExists(options.name.clone()));
        }

        if options.name == DEFAULT_PROFILE {
            return self.write_default();
        }
        if options.name == options.from_profile {
            return Err(ProfileError::SelfCopy(options.name.clone()));
        }

        let source = if options.from_profile == DEFAULT_PROFILE {
            self.ensure_default()?
        } else {
            self.load(&options.from_profile)?
        };

        tracing::debug!(
            "creating profile {} from {} at {}",
            options.name,
            source.name(),
            target.display()
        );
        files::clear_dir(&target)?;
        files::copy_all(source.path(), &target)?;
        write_metadata(&target, &ProfileMetadata::new(&options.name))?;

        Ok(Profile {
            name: options.name.clone(),
            path: target,
        })
    }

    /// Load the default profile, generating it on first use.
    pub fn ensure_default(&self) -> Result<Profile, ProfileError> {
        match self.load(DEFAULT_PROFILE) {
            Err(ProfileError::NotAProfile(_)) => self.write_default(),
            other => other,
        }
    }

    fn write_default(&self) -> Result<Profile, ProfileError> {
        let path = self.profile_path(DEFAULT_PROFILE)?;
        fs::create_dir_all(&path).map_err(|source| ProfileError::Io {
            path: path.clone(),
            source,
        })?;

        let files = [
            (ProfileFile::SnapshotFile, templates::SNAPSHOT_COMPOSE),
            (
                ProfileFile::PackageRegistryDockerfile,
                templates::PACKAGE_REGISTRY_DOCKERFILE,
            ),
        ];
        for (file, content) in files {
            let file_path = path.join(file.file_name());
            fs::write(&file_path, content).map_err(|source| ProfileError::Io {
                path: file_path.clone(),
                source,
            })?;
        }
        write_metadata(&path, &ProfileMetadata::new(DEFAULT_PROFILE))?;

        Ok(Profile {
            name: DEFAULT_PROFILE.to_string(),
            path,
        })
    }

    pub fn load(&self, name: &str) -> Result<Profile, ProfileError> {
        let path = self.profile_path(name)?;
        if !path.join(ProfileFile::Metadata.file_name()).is_file() {
            return Err(ProfileError::NotAProfile(name.to_string()));
        }
        Ok(Profile {
            name: name.to_string(),
            path,
        })
    }

    /// Metadata of every profile, sorted by name. Directories without
    /// metadata are not profiles and are skipped.
    pub fn list(&self) -> Result<Vec<ProfileMetadata>, ProfileError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ProfileError::Io {
                    path: self.root.clone(),
                    source,
                });
            }
        };

        let mut profiles = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ProfileError::Io {
                path: self.root.clone(),
                source,
            })?;
            let metadata_path = entry.path().join(ProfileFile::Metadata.file_name());
            if metadata_path.is_file() {
                profiles.push(read_metadata(&metadata_path)?);
            }
        }
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(profiles)
    }
}

fn read_metadata(path: &Path) -> Result<ProfileMetadata, ProfileError> {
    let content = fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ProfileError::Metadata {
        path: path.to_path_buf(),
        source,
    })
}

fn write_metadata(dir: &Path, metadata: &ProfileMetadata) -> Result<(), ProfileError> {
    let path = dir.join(ProfileFile::Metadata.file_name());
    let json = serde_json::to_string_pretty(metadata).map_err(|source| ProfileError::Metadata {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, json).map_err(|source| ProfileError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, Profiles) {
        let dir = tempfile::tempdir().unwrap();
        let profiles = Profiles::new(&LocationManager::with_root(dir.path()));
        (dir, profiles)
    }

    #[test]
    fn compose_env_names_the_profile() {
        let profile = Profile {
            name: "swarm".to_string(),
            path: PathBuf::from("/tmp/swarm"),
        };
        assert_eq!(
            profile.compose_env_vars(),
            vec![("PROFILE_NAME".to_string(), "swarm".to_string())]
        );
        assert_eq!(
            profile.fetch_path(ProfileFile::SnapshotFile),
            PathBuf::from("/tmp/swarm/snapshot.yml")
        );
    }

    #[test]
    fn ensure_default_writes_templates_once() {
        let (_dir, profiles) = store();
        let profile = profiles.ensure_default().unwrap();
        let compose = fs::read_to_string(profile.fetch_path(ProfileFile::SnapshotFile)).unwrap();
        assert!(compose.contains("${ELASTICSEARCH_IMAGE_REF}"));

        fs::write(profile.fetch_path(ProfileFile::SnapshotFile), "edited").unwrap();
        let again = profiles.ensure_default().unwrap();
        assert_eq!(
            fs::read_to_string(again.fetch_path(ProfileFile::SnapshotFile)).unwrap(),
            "edited"
        );
    }

    #[test]
    fn rejects_path_like_names() {
        let (_dir, profiles) = store();
        assert!(matches!(
            profiles.load("../etc"),
            Err(ProfileError::InvalidName(_))
        ));
    }
}

// ABOUTME: Stack deployment: package directory preparation, image build, deploy.
// ABOUTME: Each stage failure names the stage; applied stages are not rolled back.

use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};

use super::env::deployment_env;
use super::options::DeploymentOptions;
use crate::config::{AppConfig, ConfigError, LocationManager};
use crate::docker::{ComposeAction, Docker, DockerError};
use crate::error::ErrorKind;
use crate::files::{self, FilesError};
use crate::packages::find_build_packages_directory;
use crate::process::{CommandRunner, ProcessRunner};
use crate::profile::ProfileFile;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DeployError {
    #[snafu(display("finding build packages directory failed: {source}"))]
    FindBuildPackages { source: std::io::Error },

    #[snafu(display("clearing package contents failed: {source}"))]
    ClearPackages { source: FilesError },

    #[snafu(display("copying package contents failed: {source}"))]
    CopyPackages { source: FilesError },

    #[snafu(display("can't read application configuration: {source}"))]
    ReadConfig { source: ConfigError },

    #[snafu(display("resolving stack image references failed: {source}"))]
    ImageRefs { source: ConfigError },

    #[snafu(display("building docker images failed: {source}"))]
    BuildImages { source: DockerError },

    #[snafu(display("running docker stack deploy failed: {source}"))]
    StackDeploy { source: DockerError },

    #[snafu(display("running docker compose up failed: {source}"))]
    ComposeUp { source: DockerError },

    #[snafu(display("taking down the stack failed: {source}"))]
    TearDown { source: DockerError },

    #[snafu(display("pulling stack images failed: {source}"))]
    PullImages { source: DockerError },
}

impl DeployError {
    /// Short name of the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            DeployError::FindBuildPackages { .. } => "finding build packages directory",
            DeployError::ClearPackages { .. } => "clearing packages",
            DeployError::CopyPackages { .. } => "copying packages",
            DeployError::ReadConfig { .. } => "reading application configuration",
            DeployError::ImageRefs { .. } => "resolving image references",
            DeployError::BuildImages { .. } => "building images",
            DeployError::StackDeploy { .. } => "deploying",
            DeployError::ComposeUp { .. } => "compose up",
            DeployError::TearDown { .. } => "teardown",
            DeployError::PullImages { .. } => "pulling images",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DeployError::FindBuildPackages { .. }
            | DeployError::ClearPackages { .. }
            | DeployError::CopyPackages { .. } => ErrorKind::Filesystem,
            DeployError::ReadConfig { .. } | DeployError::ImageRefs { .. } => {
                ErrorKind::Configuration
            }
            DeployError::BuildImages { source }
            | DeployError::StackDeploy { source }
            | DeployError::ComposeUp { source }
            | DeployError::TearDown { source }
            | DeployError::PullImages { source } => ErrorKind::from(source.kind()),
        }
    }
}

/// What a deployment loaded besides the built-in packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploySummary {
    pub custom_packages: Option<PathBuf>,
}

pub struct StackDeployer<R = ProcessRunner> {
    docker: Docker<R>,
    locations: LocationManager,
    app_config: AppConfig,
    work_dir: PathBuf,
}

impl<R: CommandRunner> StackDeployer<R> {
    pub fn new(
        docker: Docker<R>,
        locations: LocationManager,
        app_config: AppConfig,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            docker,
            locations,
            app_config,
            work_dir: work_dir.into(),
        }
    }

    /// Build a deployer with `config.yml` read from the data home.
    pub fn load(
        docker: Docker<R>,
        locations: LocationManager,
        work_dir: impl Into<PathBuf>,
    ) -> Result<Self, DeployError> {
        let app_config = AppConfig::load(&locations).context(ReadConfigSnafu)?;
        Ok(Self::new(docker, locations, app_config, work_dir))
    }

    /// Deploy the profile's compose file as a swarm stack.
    pub async fn deploy(&self, options: &DeploymentOptions) -> Result<DeploySummary, DeployError> {
        let summary = self.prepare_packages()?;
        let env = self.environment(options)?;
        let compose_file = options.profile.fetch_path(ProfileFile::SnapshotFile);

        self.build_images(&compose_file, options, env.clone()).await?;

        self.docker
            .stack_deploy(&compose_file, &options.stack_name, env)
            .await
            .context(StackDeploySnafu)?;
        Ok(summary)
    }

    /// Start the stack in swarm or compose mode.
    pub async fn boot_up(&self, options: &DeploymentOptions) -> Result<DeploySummary, DeployError> {
        if options.swarm_mode {
            return self.deploy(options).await;
        }

        let summary = self.prepare_packages()?;
        let env = self.environment(options)?;
        let compose_file = options.profile.fetch_path(ProfileFile::SnapshotFile);

        self.build_images(&compose_file, options, env.clone()).await?;

        self.docker
            .compose(&compose_file, &options.stack_name, ComposeAction::Up, env)
            .await
            .context(ComposeUpSnafu)?;
        Ok(summary)
    }

    pub async fn tear_down(&self, options: &DeploymentOptions) -> Result<(), DeployError> {
        if options.swarm_mode {
            return self
                .docker
                .stack_remove(&options.stack_name)
                .await
                .context(TearDownSnafu);
        }

        let env = self.environment(options)?;
        let compose_file = options.profile.fetch_path(ProfileFile::SnapshotFile);
        self.docker
            .compose(&compose_file, &options.stack_name, ComposeAction::Down, env)
            .await
            .context(TearDownSnafu)
    }

    /// Pull the images of a stack version, agent first.
    pub async fn update_images(&self, version: &str) -> Result<(), DeployError> {
        let images = self
            .app_config
            .stack_image_refs(version)
            .context(ImageRefsSnafu)?;
        for image in images.iter() {
            tracing::info!("pulling {image}");
            self.docker.pull(image).await.context(PullImagesSnafu)?;
        }
        Ok(())
    }

    /// Reset the stack packages directory to the custom build output, if any.
    fn prepare_packages(&self) -> Result<DeploySummary, DeployError> {
        let custom = find_build_packages_directory(&self.work_dir).context(FindBuildPackagesSnafu)?;

        let packages_dir = self.locations.packages_dir();
        files::clear_dir(&packages_dir).context(ClearPackagesSnafu)?;

        if let Some(custom) = &custom {
            tracing::info!("custom build packages directory found: {}", custom.display());
            files::copy_all(custom, &packages_dir).context(CopyPackagesSnafu)?;
        }

        Ok(DeploySummary {
            custom_packages: custom,
        })
    }

    fn environment(&self, options: &DeploymentOptions) -> Result<Vec<(String, String)>, DeployError> {
        let images = self
            .app_config
            .stack_image_refs(&options.stack_version)
            .context(ImageRefsSnafu)?;
        Ok(deployment_env(&images, &options.stack_version, &options.profile))
    }

    async fn build_images(
        &self,
        compose_file: &Path,
        options: &DeploymentOptions,
        env: Vec<(String, String)>,
    ) -> Result<(), DeployError> {
        self.docker
            .compose(compose_file, &options.stack_name, ComposeAction::Build, env)
            .await
            .context(BuildImagesSnafu)
    }
}

// ABOUTME: Integration tests for stack deployment with a scripted docker runner.
// ABOUTME: Covers package preparation, environment assembly and stage errors.

mod support;

use std::fs;
use std::path::Path;

use elastic_package::config::{AppConfig, LocationManager};
use elastic_package::docker::Docker;
use elastic_package::error::ErrorKind;
use elastic_package::profile::{Profile, ProfileFile, Profiles};
use elastic_package::stack::{DeployError, DeploymentOptions, StackDeployer};
use elastic_package::types::StackName;
use support::{FakeRunner, Reply};

struct Fixture {
    home: tempfile::TempDir,
    work: tempfile::TempDir,
    profile: Profile,
}

impl Fixture {
    fn new() -> Self {
        let home = tempfile::tempdir().unwrap();
        let work = tempfile::tempdir().unwrap();
        let profile = Profiles::new(&LocationManager::with_root(home.path()))
            .ensure_default()
            .unwrap();
        Self { home, work, profile }
    }

    fn locations(&self) -> LocationManager {
        LocationManager::with_root(self.home.path())
    }

    fn deployer(&self, runner: &FakeRunner, config: AppConfig) -> StackDeployer<FakeRunner> {
        StackDeployer::new(
            Docker::new(runner.clone()),
            self.locations(),
            config,
            self.work.path(),
        )
    }

    fn options(&self, swarm_mode: bool, version: &str) -> DeploymentOptions {
        DeploymentOptions {
            swarm_mode,
            stack_name: StackName::new("elastic-package-stack").unwrap(),
            stack_version: version.to_string(),
            profile: self.profile.clone(),
        }
    }

    fn compose_file(&self) -> String {
        self.profile
            .fetch_path(ProfileFile::SnapshotFile)
            .display()
            .to_string()
    }
}

fn pairs(vars: &[(&str, &str)]) -> Vec<(String, String)> {
    vars.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn deploy_builds_then_deploys_with_merged_env() {
    support::init_tracing();
    let fixture = Fixture::new();
    let runner = FakeRunner::new();

    let summary = fixture
        .deployer(&runner, AppConfig::default())
        .deploy(&fixture.options(true, "7.14.0"))
        .await
        .unwrap();
    assert_eq!(summary.custom_packages, None);

    let compose = fixture.compose_file();
    assert_eq!(
        runner.command_lines(),
        vec![
            format!("compose -f {compose} -p elastic-package-stack build"),
            format!("stack deploy --compose-file {compose} elastic-package-stack"),
        ]
    );

    let expected = pairs(&[
        (
            "ELASTIC_AGENT_IMAGE_REF",
            "docker.elastic.co/beats/elastic-agent-complete:7.14.0",
        ),
        (
            "ELASTICSEARCH_IMAGE_REF",
            "docker.elastic.co/elasticsearch/elasticsearch:7.14.0",
        ),
        ("KIBANA_IMAGE_REF", "docker.elastic.co/kibana/kibana:7.14.0"),
        ("STACK_VERSION_VARIANT", "default"),
        ("PROFILE_NAME", "default"),
    ]);
    for call in runner.calls() {
        assert_eq!(call.env(), expected.as_slice());
    }
}

#[tokio::test]
async fn overrides_and_variant_reach_the_environment() {
    let fixture = Fixture::new();
    let runner = FakeRunner::new();
    let config = AppConfig::from_yaml(
        r#"
stack:
  image_ref_overrides:
    8.0.0:
      elastic-agent: registry.local/agent:dev
"#,
    )
    .unwrap();

    fixture
        .deployer(&runner, config)
        .deploy(&fixture.options(true, "8.0.0"))
        .await
        .unwrap();

    let env = runner.calls()[1].env().to_vec();
    assert_eq!(
        env[0],
        ("ELASTIC_AGENT_IMAGE_REF".to_string(), "registry.local/agent:dev".to_string())
    );
    assert_eq!(
        env[3],
        ("STACK_VERSION_VARIANT".to_string(), "8x".to_string())
    );
}

#[tokio::test]
async fn packages_dir_is_replaced_by_custom_build() {
    let fixture = Fixture::new();
    let packages_dir = fixture.locations().packages_dir();
    fs::create_dir_all(packages_dir.join("stale")).unwrap();

    let build = fixture.work.path().join("build/packages");
    fs::create_dir_all(build.join("nginx-1.0.0")).unwrap();
    fs::write(build.join("nginx-1.0.0/manifest.yml"), "name: nginx\n").unwrap();
    let nested = fixture.work.path().join("packages/nginx");
    fs::create_dir_all(&nested).unwrap();

    let runner = FakeRunner::new();
    let deployer = StackDeployer::new(
        Docker::new(runner.clone()),
        fixture.locations(),
        AppConfig::default(),
        &nested,
    );
    let summary = deployer
        .deploy(&fixture.options(true, "7.14.0"))
        .await
        .unwrap();

    assert_eq!(summary.custom_packages.as_deref(), Some(build.as_path()));
    assert!(!packages_dir.join("stale").exists());
    assert_eq!(
        fs::read_to_string(packages_dir.join("nginx-1.0.0/manifest.yml")).unwrap(),
        "name: nginx\n"
    );
}

#[tokio::test]
async fn build_failure_stops_before_deploy() {
    let fixture = Fixture::new();
    let runner = FakeRunner::new().reply(
        "compose",
        Reply::Fail {
            code: 1,
            stderr: "failed to solve: package-registry",
        },
    );

    let err = fixture
        .deployer(&runner, AppConfig::default())
        .deploy(&fixture.options(true, "7.14.0"))
        .await
        .unwrap_err();

    assert!(matches!(err, DeployError::BuildImages { .. }));
    assert_eq!(err.stage(), "building images");
    assert_eq!(err.kind(), ErrorKind::Execution);
    assert!(err.to_string().starts_with("building docker images failed"));
    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn deploy_failure_names_the_deploy_stage() {
    let fixture = Fixture::new();
    let runner = FakeRunner::new().reply(
        "stack deploy",
        Reply::Fail {
            code: 1,
            stderr: "this node is not a swarm manager",
        },
    );

    let err = fixture
        .deployer(&runner, AppConfig::default())
        .deploy(&fixture.options(true, "7.14.0"))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), "deploying");
    assert!(err.to_string().contains("not a swarm manager"));
}

#[tokio::test]
async fn invalid_version_fails_before_any_command() {
    let fixture = Fixture::new();
    let runner = FakeRunner::new();

    let err = fixture
        .deployer(&runner, AppConfig::default())
        .deploy(&fixture.options(true, "8.0 beta"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn compose_mode_uses_up_and_down() {
    let fixture = Fixture::new();
    let runner = FakeRunner::new();
    let deployer = fixture.deployer(&runner, AppConfig::default());
    let options = fixture.options(false, "7.14.0");

    deployer.boot_up(&options).await.unwrap();
    deployer.tear_down(&options).await.unwrap();

    let compose = fixture.compose_file();
    assert_eq!(
        runner.command_lines(),
        vec![
            format!("compose -f {compose} -p elastic-package-stack build"),
            format!("compose -f {compose} -p elastic-package-stack up -d"),
            format!("compose -f {compose} -p elastic-package-stack down"),
        ]
    );
}

#[tokio::test]
async fn swarm_tear_down_removes_the_stack() {
    let fixture = Fixture::new();
    let runner = FakeRunner::new();

    fixture
        .deployer(&runner, AppConfig::default())
        .tear_down(&fixture.options(true, "7.14.0"))
        .await
        .unwrap();

    assert_eq!(runner.command_lines(), vec!["stack rm elastic-package-stack"]);
}

#[tokio::test]
async fn update_pulls_every_stack_image() {
    let fixture = Fixture::new();
    let runner = FakeRunner::new();

    fixture
        .deployer(&runner, AppConfig::default())
        .update_images("7.14.0")
        .await
        .unwrap();

    assert_eq!(
        runner.command_lines(),
        vec![
            "pull docker.elastic.co/beats/elastic-agent-complete:7.14.0",
            "pull docker.elastic.co/elasticsearch/elasticsearch:7.14.0",
            "pull docker.elastic.co/kibana/kibana:7.14.0",
        ]
    );
}

#[tokio::test]
async fn load_reads_config_from_data_home() {
    let fixture = Fixture::new();
    fs::write(fixture.locations().config_file(), "stack: [not, a, mapping]\n").unwrap();

    let result = StackDeployer::load(
        Docker::new(FakeRunner::new()),
        fixture.locations(),
        Path::new("."),
    );
    let err = result.err().unwrap();
    assert_eq!(err.stage(), "reading application configuration");
}

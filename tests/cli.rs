// ABOUTME: Integration tests for the elastic-package CLI commands.
// ABOUTME: Validates --help output, manifest queries and input validation.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn elastic_package_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("elastic-package"))
}

fn integrations_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("go.mod"),
        "module github.com/elastic/integrations\n\ngo 1.16\n",
    )
    .unwrap();
    for (name, kind) in [("apache", "integration"), ("nginx", "integration"), ("log", "input")] {
        let pkg = dir.path().join("packages").join(name);
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("manifest.yml"), format!("name: {name}\ntype: {kind}\n")).unwrap();
    }
    dir
}

#[test]
fn help_shows_commands() {
    elastic_package_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stack"))
        .stdout(predicate::str::contains("profiles"))
        .stdout(predicate::str::contains("query"));
}

#[test]
fn swarm_help_lists_lifecycle_commands() {
    elastic_package_cmd()
        .args(["stack", "swarm", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("leave"))
        .stdout(predicate::str::contains("up"))
        .stdout(predicate::str::contains("down"));
}

#[test]
fn query_manifest_prints_matches() {
    let repo = integrations_repo();

    elastic_package_cmd()
        .current_dir(repo.path())
        .args(["query", "manifest", "--key", "type", "--value", "integration"])
        .assert()
        .success()
        .stdout("apache\nnginx\n");
}

#[test]
fn query_manifest_json_output() {
    let repo = integrations_repo();
    fs::create_dir_all(repo.path().join("packages/broken")).unwrap();
    fs::write(repo.path().join("packages/broken/manifest.yml"), "name: [").unwrap();

    let output = elastic_package_cmd()
        .current_dir(repo.path())
        .args(["--json", "query", "manifest", "--key", "type", "--value", "input,integration"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["matched"], serde_json::json!(["log"]));
    assert_eq!(report["skipped"][0]["package"], "broken");
}

#[test]
fn query_manifest_reports_no_matches() {
    let repo = integrations_repo();

    elastic_package_cmd()
        .current_dir(repo.path())
        .args(["query", "manifest", "--key", "type", "--value", "content"])
        .assert()
        .success()
        .stdout("key with value not found in any packages\n");

    elastic_package_cmd()
        .current_dir(repo.path())
        .args(["--quiet", "query", "manifest", "--key", "type", "--value", "content"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn query_outside_integrations_root_fails() {
    let dir = tempfile::tempdir().unwrap();

    elastic_package_cmd()
        .current_dir(dir.path())
        .args(["query", "manifest", "--key", "name", "--value", "nginx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "query must be executed from the integrations project root directory",
        ));
}

#[test]
fn swarm_init_requires_existing_interface() {
    let home = tempfile::tempdir().unwrap();

    elastic_package_cmd()
        .env("ELASTIC_PACKAGE_DATA_HOME", home.path())
        .args([
            "stack",
            "swarm",
            "init",
            "--interface",
            "nonexistent0",
            "--subnet",
            "10.0.0.0/24",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cannot create docker swarm without overlay network interface",
        ));

    assert!(!home.path().join("profiles").exists());
}

#[test]
fn swarm_init_rejects_invalid_subnet() {
    let home = tempfile::tempdir().unwrap();

    elastic_package_cmd()
        .env("ELASTIC_PACKAGE_DATA_HOME", home.path())
        .args(["stack", "swarm", "init", "--interface", "lo", "--subnet", "10.0.0.0/40"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("create overlay network failed"));
}

#[test]
fn invalid_stack_name_is_rejected() {
    let home = tempfile::tempdir().unwrap();

    elastic_package_cmd()
        .env("ELASTIC_PACKAGE_DATA_HOME", home.path())
        .args(["stack", "swarm", "down", "--stack-name", "Bad Name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid stack name"));
}

#[test]
fn profiles_create_and_list() {
    let home = tempfile::tempdir().unwrap();

    elastic_package_cmd()
        .env("ELASTIC_PACKAGE_DATA_HOME", home.path())
        .args(["profiles", "create", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created profile dev"));

    elastic_package_cmd()
        .env("ELASTIC_PACKAGE_DATA_HOME", home.path())
        .args(["--quiet", "profiles", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default").and(predicate::str::contains("dev")));
}

#[test]
fn unknown_profile_lists_known_profiles() {
    let home = tempfile::tempdir().unwrap();

    elastic_package_cmd()
        .env("ELASTIC_PACKAGE_DATA_HOME", home.path())
        .args(["stack", "up", "--profile", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "missing is not a valid profile, known profiles are: default",
        ));
}

use std::fs;

use bridge_core::db::{WorkspaceConfig, WorkspaceLayout};
use predicates::str::contains;
use tempfile::tempdir;

mod common;

#[test]
fn init_writes_config_and_database() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();

    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .arg("init")
        .arg("--root")
        .arg(root)
        .arg("--name")
        .arg("Checkout")
        .assert()
        .success()
        .stdout(contains("Initialized design-bridge workspace"));

    let layout = WorkspaceLayout::new(root);
    assert!(layout.config_path.is_file());
    assert!(layout.db_path.is_file());
    assert!(layout.reports_dir.is_dir());

    let config: WorkspaceConfig =
        serde_json::from_str(&fs::read_to_string(&layout.config_path).expect("read config"))
            .expect("parse config");
    assert_eq!(config.name, "Checkout");
    assert_eq!(config.db.path, ".bridge/bridge.db");
}

#[test]
fn init_uses_current_dir_by_default() {
    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    assert!(WorkspaceLayout::new(dir.path()).is_initialized());
}

#[test]
fn info_reports_workspace_as_json() {
    let dir = tempdir().expect("tempdir");
    common::init_workspace(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .arg("info")
        .arg("--root")
        .arg(dir.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(contains("\"config_version\": \"0.1.0\""))
        .stdout(contains("\"confirmations\": 0"));
}

#[test]
fn info_fails_without_workspace() {
    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .arg("info")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("No design-bridge workspace"))
        .stderr(contains("run `design-bridge init` first"));
}

#[test]
fn confirm_and_list_confirmations() {
    let dir = tempdir().expect("tempdir");
    common::init_workspace(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .args(["confirm", "--component", "Submit Button", "--node", "n2", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("Node: n2"));

    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .args(["confirmations", "--json", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("\"component\": \"Submit Button\""));

    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .args(["confirm", "--component", "Submit Button", "--remove", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("Removed confirmation"));

    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .args(["confirmations", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("(none)"));
}

#[test]
fn confirm_requires_node_unless_removing() {
    let dir = tempdir().expect("tempdir");
    common::init_workspace(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .args(["confirm", "--component", "Submit Button", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("--node is required"));
}

#[test]
fn runs_rejects_unknown_kind() {
    let dir = tempdir().expect("tempdir");
    common::init_workspace(dir.path());

    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .args(["runs", "--kind", "slicing", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("Invalid run kind"));
}

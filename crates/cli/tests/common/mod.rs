#![allow(dead_code)]
//! Shared input files for CLI tests.

use std::fs;
use std::path::{Path, PathBuf};

pub const NODES_JSON: &str = r#"[
  { "id": "n1", "name": "Submit Button", "category": "INSTANCE",
    "bounds": { "x": 0, "y": 0, "width": 120, "height": 40 } },
  { "id": "n2", "name": "Submit", "category": "INSTANCE",
    "bounds": { "x": 0, "y": 60, "width": 120, "height": 40 } },
  { "id": "n3", "name": "Footer", "category": "FRAME",
    "bounds": { "x": 0, "y": 700, "width": 400, "height": 100 } }
]"#;

pub const RENDERED_JSON: &str = r#"[
  { "name": "Submit Button", "bounds": { "x": 0, "y": 0, "width": 120, "height": 40 } },
  { "name": "Submit Button", "bounds": { "x": 0, "y": 60, "width": 120, "height": 40 } }
]"#;

pub const GROUPS_YAML: &str = "- name: Actions\n  category: button\n- name: Footer area\n  children: [n3]\n";

pub fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write fixture");
    path
}

pub fn init_workspace(root: &Path) {
    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .arg("init")
        .arg("--root")
        .arg(root)
        .assert()
        .success();
}

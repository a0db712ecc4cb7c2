use predicates::str::contains;
use tempfile::tempdir;

mod common;

use common::write;

const STACK_JSON: &str = r#"[
  { "id": "a", "bounds": { "x": 0, "y": 0, "width": 10, "height": 10 } },
  { "id": "b", "bounds": { "x": 2, "y": 5, "width": 10, "height": 10 } },
  { "id": "c", "bounds": { "x": 0, "y": 8, "width": 10, "height": 10 } },
  { "id": "d", "bounds": { "x": 100, "y": 120, "width": 10, "height": 10 } },
  { "id": "e", "bounds": { "x": 101, "y": 124, "width": 10, "height": 10 } }
]"#;

#[test]
fn sections_split_on_gap() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "stack.json", STACK_JSON);

    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .args(["sections", "--nodes", "stack.json", "--gap", "50", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("Sections (2"))
        .stdout(contains("1: a, b, c"))
        .stdout(contains("2: d, e"));
}

#[test]
fn clusters_as_json() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "stack.json", STACK_JSON);

    let output = assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .args(["clusters", "--nodes", "stack.json", "--max-distance", "20", "--json", "--root"])
        .arg(dir.path())
        .output()
        .expect("run clusters");
    assert!(output.status.success());
    let clusters: Vec<Vec<String>> = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(clusters, vec![vec!["a", "b", "c"], vec!["d", "e"]]);
}

#[test]
fn align_buckets_columns() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "stack.json", STACK_JSON);

    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .args(["align", "--nodes", "stack.json", "--axis", "x", "--tolerance", "10", "--root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("Alignment groups (2"))
        .stdout(contains("X = 0: a, b, c"))
        .stdout(contains("X = 100: d, e"));
}

#[test]
fn align_rejects_unknown_axis() {
    let dir = tempdir().expect("tempdir");
    write(dir.path(), "stack.json", STACK_JSON);

    assert_cmd::cargo::cargo_bin_cmd!("design-bridge")
        .args(["align", "--nodes", "stack.json", "--axis", "z", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(contains("Unknown axis"));
}

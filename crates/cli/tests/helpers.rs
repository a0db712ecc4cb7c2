use std::fs;
use std::path::Path;

use bridge_core::model::DesignNode;
use design_bridge::{canonicalize_or_current, infer_workspace_name, read_input, sha256_file};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let original = std::env::current_dir().expect("cwd");
    let tmp = tempdir().expect("tempdir");
    std::env::set_current_dir(tmp.path()).expect("chdir tmp");

    let result = canonicalize_or_current(".").expect("canonicalize").canonicalize().expect("canon");
    let expected = tmp.path().canonicalize().expect("canon tmp");
    assert_eq!(result, expected);

    std::env::set_current_dir(original).expect("restore cwd");
}

#[test]
fn infer_workspace_name_uses_last_path_component() {
    assert_eq!(infer_workspace_name(Path::new("/tmp/checkout-screen")), "checkout-screen");
    assert_eq!(infer_workspace_name(Path::new("/")), "unnamed-workspace");
}

#[test]
fn sha256_file_matches_known_digest() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("abc.txt");
    fs::write(&path, "abc").expect("write");
    assert_eq!(
        sha256_file(&path).expect("hash"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn read_input_accepts_json_and_yaml() {
    let tmp = tempdir().expect("tempdir");
    let json = tmp.path().join("nodes.json");
    fs::write(&json, r#"[{ "id": "n1", "name": "Title", "category": "TEXT" }]"#).expect("write");
    let yaml = tmp.path().join("nodes.yml");
    fs::write(&yaml, "- id: n1\n  name: Title\n  category: TEXT\n  textContent: Hello\n")
        .expect("write");

    let from_json: Vec<DesignNode> = read_input(&json).expect("json");
    let from_yaml: Vec<DesignNode> = read_input(&yaml).expect("yaml");
    assert_eq!(from_json[0].id, "n1");
    assert_eq!(from_yaml[0].text_content.as_deref(), Some("Hello"));
    assert!(from_json[0].bounds.is_empty());
}

#[test]
fn read_input_rejects_unknown_extension() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("nodes.csv");
    fs::write(&path, "id,name").expect("write");
    let err = read_input::<Vec<DesignNode>>(&path).expect_err("csv unsupported");
    assert!(err.to_string().contains("Unsupported input format"));
}

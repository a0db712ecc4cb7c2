use std::fs;

use bridge_core::config::{load_engine_config, EngineConfig, GroupingConfig, MatchConfig};
use bridge_core::db::{load_workspace_config, resolve_db_path, WorkspaceConfig, WorkspaceLayout};
use bridge_core::model::GroupCategory;
use tempfile::tempdir;

#[test]
fn partial_yaml_overrides_only_named_keys() {
    let tmp = tempdir().expect("temp dir");
    let path = tmp.path().join("engine.yaml");
    fs::write(
        &path,
        "matching:\n  min_confidence: 35\n  auto_confirm_threshold: 90\ngrouping:\n  member_limits:\n    button: 1\n",
    )
    .expect("write yaml");

    let config = load_engine_config(&path).expect("load yaml");
    assert_eq!(config.matching.min_confidence, 35.0);
    assert_eq!(config.matching.auto_confirm_threshold, Some(90.0));
    assert_eq!(config.matching.top_k, MatchConfig::default().top_k);
    assert_eq!(config.grouping.member_limits.for_category(GroupCategory::Button), 1);
    assert_eq!(config.grouping.member_limits.for_category(GroupCategory::Text), 5);
    assert_eq!(config.grouping.section_gap, GroupingConfig::default().section_gap);
}

#[test]
fn json_config_is_accepted() {
    let tmp = tempdir().expect("temp dir");
    let path = tmp.path().join("engine.json");
    fs::write(&path, r#"{ "grouping": { "max_fallback_groups": 10 } }"#).expect("write json");

    let config = load_engine_config(&path).expect("load json");
    assert_eq!(config.grouping.max_fallback_groups, 10);
    assert_eq!(config.matching, MatchConfig::default());
}

#[test]
fn unsupported_extension_is_rejected() {
    let tmp = tempdir().expect("temp dir");
    let path = tmp.path().join("engine.toml");
    fs::write(&path, "x = 1").expect("write toml");

    let err = load_engine_config(&path).expect_err("toml is unsupported");
    assert!(err.to_string().contains("Unsupported engine config format"));
}

#[test]
fn missing_file_reports_path() {
    let tmp = tempdir().expect("temp dir");
    let err = load_engine_config(&tmp.path().join("nope.yaml")).expect_err("missing");
    assert!(err.to_string().contains("nope.yaml"));
}

#[test]
fn default_scores_fit_their_caps() {
    let config = EngineConfig::default();
    let matching = &config.matching;
    let max = matching.text_cap + matching.category_cap + matching.visual_cap
        + matching.size_cap * matching.size_weight;
    assert!(max >= 100.0);
    assert_eq!(config.grouping.max_node_score(), 8.5);
}

#[test]
fn workspace_config_without_engine_section_uses_defaults() {
    let minimal = r#"{ "name": "ws", "config_version": "0.1.0", "db": { "path": ".bridge/bridge.db" } }"#;
    let config: WorkspaceConfig = serde_json::from_str(minimal).expect("deserialize minimal config");
    assert_eq!(config.engine, EngineConfig::default());
    assert!(config.description.is_none());
}

#[test]
fn layout_paths_are_rooted() {
    let layout = WorkspaceLayout::new("/tmp/ws");
    assert_eq!(layout.db_path_relative_string(), ".bridge/bridge.db");
    assert!(layout.config_path.ends_with(".bridge/workspace.json"));
    assert!(layout.report_path("matching", "20260101").ends_with("reports/matching-20260101.json"));
}

#[test]
fn db_path_resolves_against_workspace_root() {
    let layout = WorkspaceLayout::new("/tmp/ws");
    let relative = WorkspaceConfig::new("ws", ".bridge/bridge.db");
    assert_eq!(resolve_db_path(&layout, &relative), layout.root.join(".bridge/bridge.db"));

    let absolute = WorkspaceConfig::new("ws", "/var/data/bridge.db");
    assert_eq!(resolve_db_path(&layout, &absolute), std::path::PathBuf::from("/var/data/bridge.db"));
}

#[test]
fn corrupt_workspace_config_points_at_init() {
    let dir = tempdir().expect("temp dir");
    let layout = WorkspaceLayout::new(dir.path());
    fs::create_dir_all(&layout.meta_dir).expect("create .bridge dir");
    fs::write(&layout.config_path, "{ not json").expect("write config");

    let err = load_workspace_config(&layout).expect_err("invalid config");
    assert!(err.to_string().contains("re-run `design-bridge init`"), "{err}");
}

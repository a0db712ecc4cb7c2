use bridge_core::config::GroupingConfig;
use bridge_core::grouping::{Band, GroupScorer, Heuristic, SemanticGrouper};
use bridge_core::model::{Bounds, DesignNode, GroupCategory, GroupSkeleton, NodeCategory};
use serde_json::json;

fn text(id: &str, name: &str, y: f64) -> DesignNode {
    DesignNode::new(id, name, NodeCategory::Text, Bounds::new(20.0, y, 200.0, 24.0))
}

fn frame(id: &str, name: &str, y: f64) -> DesignNode {
    DesignNode::new(id, name, NodeCategory::Frame, Bounds::new(0.0, y, 400.0, 80.0))
}

/// A 400x800 screen: two text lines up top, a body frame, a footer frame.
fn screen() -> Vec<DesignNode> {
    vec![
        text("title", "Title", 10.0),
        text("subtitle", "Subtitle", 50.0),
        frame("body", "Body", 300.0),
        frame("footer", "Footer", 720.0),
    ]
}

fn ids(nodes: &[&DesignNode]) -> Vec<String> {
    nodes.iter().map(|n| n.id.clone()).collect()
}

#[test]
fn header_section_selects_top_band_nodes() {
    let config = GroupingConfig::default();
    let scorer = GroupScorer::with_frame(&config, Bounds::new(0.0, 0.0, 400.0, 800.0));
    let nodes = vec![text("a", "Logo", 10.0), text("b", "Tagline", 50.0), text("c", "Legal", 700.0)];
    let pool: Vec<&DesignNode> = nodes.iter().collect();
    let group = GroupSkeleton::new("Header Section");

    assert_eq!(scorer.band_for(&group), Some(Band::Top));
    assert_eq!(ids(&scorer.position_matches(&group, &pool)), vec!["a", "b"]);

    let ranked = scorer.rank(&group, &pool);
    let picked: Vec<&str> = ranked.iter().map(|s| s.node.id.as_str()).collect();
    assert_eq!(picked, vec!["a", "b"]);
    assert!(ranked.iter().all(|s| s.heuristics == vec![Heuristic::Position]));
}

#[test]
fn bottom_node_needs_a_second_heuristic() {
    let config = GroupingConfig::default();
    let scorer = GroupScorer::with_frame(&config, Bounds::new(0.0, 0.0, 400.0, 800.0));
    let nodes = vec![text("a", "Logo", 10.0), text("b", "Tagline", 50.0), frame("c", "Legal", 700.0)];
    let pool: Vec<&DesignNode> = nodes.iter().collect();
    let group = GroupSkeleton::new("Header Section");

    let ranked = scorer.rank(&group, &pool);
    let bottom = ranked.iter().find(|s| s.node.id == "c").expect("frame matched by category");
    assert_eq!(bottom.heuristics, vec![Heuristic::Category]);
    assert!(ranked.iter().any(|s| s.node.id == "a"));
    assert!(ranked.iter().any(|s| s.node.id == "b"));
}

#[test]
fn section_band_follows_declared_position() {
    let config = GroupingConfig::default();
    let scorer = GroupScorer::with_frame(&config, Bounds::new(0.0, 0.0, 400.0, 800.0));
    let nodes = screen();
    let pool: Vec<&DesignNode> = nodes.iter().collect();

    let undeclared = GroupSkeleton::new("Promo Section");
    assert_eq!(scorer.band_for(&undeclared), None);

    let declared = undeclared.with_bounds(Bounds::new(0.0, 320.0, 400.0, 60.0));
    assert_eq!(scorer.band_for(&declared), Some(Band::Near(320.0)));
    assert_eq!(ids(&scorer.position_matches(&declared, &pool)), vec!["body"]);
    assert_eq!(ids(&scorer.proximity_matches(&declared, &pool)), vec!["body"]);
}

#[test]
fn band_keywords_match_whole_words() {
    let config = GroupingConfig::default();
    let scorer = GroupScorer::with_frame(&config, Bounds::new(0.0, 0.0, 400.0, 800.0));
    let cases = [
        ("Topics", None),
        ("Maintenance", None),
        ("Bodyweight stats", None),
        ("TopBar", Some(Band::Top)),
        ("Bottom actions", Some(Band::Bottom)),
        ("Main content", Some(Band::Middle)),
    ];
    for (name, expected) in cases {
        assert_eq!(scorer.band_for(&GroupSkeleton::new(name)), expected, "{name}");
    }
}

#[test]
fn category_inference_ignores_keyword_fragments() {
    let cases = [
        ("Information Section", GroupCategory::Container),
        ("Performance", GroupCategory::Other),
        ("Context", GroupCategory::Other),
        ("Sign-in form", GroupCategory::Input),
        ("Tab Bar", GroupCategory::Navigation),
        ("News items", GroupCategory::List),
    ];
    for (name, expected) in cases {
        assert_eq!(GroupCategory::infer_from_name(name), expected, "{name}");
    }
}

#[test]
fn information_section_does_not_make_a_form_screen() {
    let nodes = screen();
    let proposed =
        vec![GroupSkeleton::new("Information Section").with_children(["title", "subtitle"])];
    let result = SemanticGrouper::default().group(&nodes, Some(proposed.as_slice()));
    let summary = result.layout_summary.expect("summary");
    assert_eq!(summary.screen_category, "content");
}

#[test]
fn keyword_matching_reads_description_and_skips_short_tokens() {
    let config = GroupingConfig::default();
    let scorer = GroupScorer::with_frame(&config, Bounds::new(0.0, 0.0, 400.0, 800.0));
    let nodes = vec![
        text("legal", "Legal", 700.0).with_text("Terms of use"),
        text("of", "Of", 10.0),
    ];
    let pool: Vec<&DesignNode> = nodes.iter().collect();
    let group = GroupSkeleton::new("Fine print").with_description("terms of service");

    assert_eq!(ids(&scorer.keyword_matches(&group, &pool)), vec!["legal"]);
}

#[test]
fn selection_respects_member_limit() {
    let config = GroupingConfig::default();
    let scorer = GroupScorer::with_frame(&config, Bounds::new(0.0, 0.0, 400.0, 800.0));
    let nodes: Vec<DesignNode> =
        (0..8).map(|i| text(&format!("t{i}"), "Line", 10.0 + i as f64 * 20.0)).collect();
    let pool: Vec<&DesignNode> = nodes.iter().collect();
    let group = GroupSkeleton::new("Copy").with_category(GroupCategory::Button);
    assert!(scorer.select(&group, &pool).is_empty());

    let group = GroupSkeleton::new("Copy").with_category(GroupCategory::Text);
    let chosen = scorer.select(&group, &pool);
    assert_eq!(chosen.len(), config.member_limits.text);
    assert_eq!(chosen[0].node.id, "t0");
}

#[test]
fn provided_children_are_validated_and_clamped() {
    let nodes = screen();
    let proposed = vec![GroupSkeleton {
        id: Some("hero".to_string()),
        confidence: Some(1.7),
        ..GroupSkeleton::new("Hero").with_children(["title", "ghost", "title", "subtitle"])
    }];

    let result = SemanticGrouper::default().group(&nodes, Some(proposed.as_slice()));
    let hero = result.group("hero").expect("hero group");

    assert_eq!(hero.children, vec!["title", "subtitle"]);
    assert_eq!(hero.confidence, 1.0);
    assert_eq!(hero.properties.get("mapping"), Some(&json!("provided")));
    assert_eq!(hero.bounds, Bounds::new(20.0, 10.0, 200.0, 64.0));
    assert_eq!(result.ungrouped_nodes, vec!["body", "footer"]);
}

#[test]
fn provided_group_without_confidence_uses_default() {
    let nodes = screen();
    let proposed = vec![GroupSkeleton::new("Hero").with_children(["title"])];
    let result = SemanticGrouper::default().group(&nodes, Some(proposed.as_slice()));
    assert_eq!(result.groups[0].id, "group-1");
    assert_eq!(result.groups[0].confidence, 0.6);
}

#[test]
fn group_with_no_plausible_members_is_kept_unassigned() {
    let nodes = screen();
    let proposed = vec![GroupSkeleton::new("zzz qqq").with_category(GroupCategory::Other)];

    let result = SemanticGrouper::default().group(&nodes, Some(proposed.as_slice()));
    assert_eq!(result.groups.len(), 1);
    let group = &result.groups[0];
    assert!(group.children.is_empty());
    assert_eq!(group.confidence, 0.1);
    assert_eq!(group.properties.get("mapping"), Some(&json!("unassigned")));
    assert_eq!(result.ungrouped_nodes.len(), nodes.len());
    assert!(result.layout_summary.is_none());
}

#[test]
fn auto_mapped_groups_never_share_nodes() {
    let nodes = screen();
    let proposed = vec![
        GroupSkeleton::new("Header").with_category(GroupCategory::Text),
        GroupSkeleton::new("Header copy").with_category(GroupCategory::Text),
    ];

    let result = SemanticGrouper::default().group(&nodes, Some(proposed.as_slice()));
    let first = &result.groups[0];
    let second = &result.groups[1];

    assert_eq!(first.children, vec!["title", "subtitle"]);
    assert_eq!(first.properties.get("mapping"), Some(&json!("auto")));
    assert!(first.confidence > 0.1 && first.confidence <= 1.0);
    assert!(second.children.iter().all(|c| !first.children.contains(c)));
}

#[test]
fn provided_children_are_withheld_from_auto_mapping() {
    let nodes = screen();
    let proposed = vec![
        GroupSkeleton::new("Header").with_category(GroupCategory::Text),
        GroupSkeleton::new("Hero").with_children(["title"]),
    ];

    let result = SemanticGrouper::default().group(&nodes, Some(proposed.as_slice()));
    assert_eq!(result.groups[0].children, vec!["subtitle"]);
    assert_eq!(result.groups[1].children, vec!["title"]);
}

#[test]
fn skeleton_properties_survive_completion() {
    let nodes = screen();
    let mut skeleton = GroupSkeleton::new("Hero").with_children(["title"]);
    skeleton.properties.insert("variant".to_string(), json!("dark"));

    let proposed = vec![skeleton];
    let result = SemanticGrouper::default().group(&nodes, Some(proposed.as_slice()));
    let props = &result.groups[0].properties;
    assert_eq!(props.get("variant"), Some(&json!("dark")));
    assert_eq!(props.get("mapping"), Some(&json!("provided")));
}

#[test]
fn fallback_makes_one_group_per_node_in_reading_order() {
    let mut nodes = screen();
    nodes.reverse();

    let result = SemanticGrouper::default().group(&nodes, None);
    let group_ids: Vec<&str> = result.groups.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(group_ids, vec!["group-title", "group-subtitle", "group-body", "group-footer"]);
    assert!(result.ungrouped_nodes.is_empty());
    assert!(result.groups.iter().all(|g| g.confidence == 0.5));
    assert_eq!(result.overall_confidence, 0.5);

    let title = result.group("group-title").expect("title group");
    assert_eq!(title.category, GroupCategory::Text);
    assert_eq!(title.children, vec!["title"]);
    assert_eq!(title.properties.get("mapping"), Some(&json!("fallback")));
    assert_eq!(result.group("group-body").map(|g| g.category), Some(GroupCategory::Container));
}

#[test]
fn fallback_is_capped() {
    let nodes = screen();
    let config = GroupingConfig { max_fallback_groups: 2, ..GroupingConfig::default() };

    let result = SemanticGrouper::new(config).group(&nodes, None);
    assert_eq!(result.groups.len(), 2);
    assert_eq!(result.ungrouped_nodes, vec!["body", "footer"]);
}

#[test]
fn empty_input_produces_empty_result() {
    let result = SemanticGrouper::default().group(&[], None);
    assert!(result.groups.is_empty());
    assert!(result.ungrouped_nodes.is_empty());
    assert_eq!(result.overall_confidence, 0.0);
    assert!(result.layout_summary.is_none());
}

#[test]
fn layout_summary_reads_top_to_bottom_then_left_to_right() {
    let nodes = vec![
        DesignNode::new("search", "Search", NodeCategory::Instance, Bounds::new(220.0, 10.0, 160.0, 40.0)),
        DesignNode::new("logo", "Logo", NodeCategory::Ellipse, Bounds::new(10.0, 12.0, 40.0, 40.0)),
        frame("feed", "Feed", 300.0),
    ];
    let proposed = vec![
        GroupSkeleton::new("Search bar").with_children(["search"]),
        GroupSkeleton::new("Brand").with_category(GroupCategory::Image).with_children(["logo"]),
        GroupSkeleton::new("Feed").with_children(["feed"]),
    ];

    let result = SemanticGrouper::default().group(&nodes, Some(proposed.as_slice()));
    let summary = result.layout_summary.expect("summary");
    assert_eq!(summary.ordered_section_names, vec!["Brand", "Search bar", "Feed"]);
    assert_eq!(summary.flow_description, "Brand → Search bar → Feed");
    assert_eq!(summary.screen_category, "form");
}

#[test]
fn overall_confidence_is_mean_of_groups() {
    let nodes = screen();
    let proposed = vec![
        GroupSkeleton { confidence: Some(0.9), ..GroupSkeleton::new("A").with_children(["title"]) },
        GroupSkeleton { confidence: Some(0.3), ..GroupSkeleton::new("B").with_children(["body"]) },
    ];
    let result = SemanticGrouper::default().group(&nodes, Some(proposed.as_slice()));
    assert!((result.overall_confidence - 0.6).abs() < 1e-9);
}

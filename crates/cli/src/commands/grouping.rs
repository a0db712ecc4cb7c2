use anyhow::{Context, Result};
use bridge_core::db::WorkspaceLayout;
use bridge_core::grouping::SemanticGrouper;
use bridge_core::model::{DesignNode, GroupSkeleton, GroupingResult};
use bridge_core::services::{InputDigests, WorkspaceSession};
use log::{info, warn};

use crate::commands::{engine_config, optional_context, print_json, write_report};
use crate::{canonicalize_or_current, read_input, resolve_input, sha256_file};

/// Group design nodes, completing proposed groups when a file is given.
pub fn group_command(
    root: &str,
    nodes: &str,
    groups: Option<&str>,
    config_file: Option<&str>,
    json: bool,
    report: bool,
) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let nodes_path = resolve_input(&root_path, nodes);
    let groups_path = groups.map(|g| resolve_input(&root_path, g));

    let design_nodes: Vec<DesignNode> = read_input(&nodes_path)?;
    let proposed: Option<Vec<GroupSkeleton>> =
        groups_path.as_deref().map(read_input::<Vec<GroupSkeleton>>).transpose()?;

    let ctx = optional_context(&root_path)?;
    let engine = engine_config(&root_path, ctx.as_ref(), config_file)?;

    let result = match &ctx {
        Some(ctx) => {
            let digests = InputDigests {
                nodes: sha256_file(&nodes_path)?,
                secondary: groups_path.as_deref().map(sha256_file).transpose()?,
            };
            WorkspaceSession::new(&engine, &ctx.db)
                .run_grouping(&design_nodes, proposed.as_deref(), &digests)
                .context("Failed to record grouping run")?
        }
        None => {
            warn!("no workspace at {}; grouping without run history", root_path.display());
            SemanticGrouper::new(engine.grouping.clone()).group(&design_nodes, proposed.as_deref())
        }
    };

    let report_path = if report {
        let layout = WorkspaceLayout::new(&root_path);
        let path = write_report(&layout, "grouping", &result)?;
        info!("wrote grouping report to {}", path.display());
        Some(path)
    } else {
        None
    };

    if json {
        return print_json(&result);
    }

    print_grouping(&result);
    if let Some(path) = report_path {
        println!("Report: {}", path.display());
    }
    Ok(())
}

fn print_grouping(result: &GroupingResult) {
    println!("Grouping");
    println!(
        "  Groups: {}, ungrouped nodes: {}",
        result.groups.len(),
        result.ungrouped_nodes.len()
    );
    println!("  Overall confidence: {:.2}", result.overall_confidence);

    for group in &result.groups {
        let mapping = group.properties.get("mapping").and_then(|v| v.as_str()).unwrap_or("-");
        let members =
            if group.children.is_empty() { "(none)".to_string() } else { group.children.join(", ") };
        println!(
            "  - {} \"{}\" [{}] {:.2} {}: {}",
            group.id,
            group.name,
            group.category.as_str(),
            group.confidence,
            mapping,
            members
        );
    }

    if let Some(summary) = &result.layout_summary {
        println!("  Layout ({}): {}", summary.screen_category, summary.flow_description);
    }
    if !result.ungrouped_nodes.is_empty() {
        println!("  Ungrouped: {}", result.ungrouped_nodes.join(", "));
    }
}

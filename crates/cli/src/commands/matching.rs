use anyhow::{Context, Result};
use bridge_core::db::{WorkspaceContext, WorkspaceLayout};
use bridge_core::matching::BoundsMatcher;
use bridge_core::model::{DesignNode, MatchPolicy, MatchingResult, RenderedBounds};
use bridge_core::services::{InputDigests, WorkspaceSession};
use log::{info, warn};

use crate::commands::{engine_config, optional_context, print_json, write_report};
use crate::{canonicalize_or_current, read_input, resolve_input, sha256_file};

/// Match rendered elements against design nodes.
///
/// Inside an initialized workspace the run is recorded and stored
/// confirmations are re-applied; elsewhere the engine runs standalone.
pub fn match_command(
    root: &str,
    nodes: &str,
    rendered: &str,
    policy: &str,
    config_file: Option<&str>,
    json: bool,
    report: bool,
) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let policy: MatchPolicy = policy.parse()?;
    let nodes_path = resolve_input(&root_path, nodes);
    let rendered_path = resolve_input(&root_path, rendered);

    let design_nodes: Vec<DesignNode> = read_input(&nodes_path)?;
    let components: Vec<RenderedBounds> = read_input(&rendered_path)?;

    let ctx = optional_context(&root_path)?;
    let engine = engine_config(&root_path, ctx.as_ref(), config_file)?;

    let result = match &ctx {
        Some(ctx) => {
            let digests = InputDigests {
                nodes: sha256_file(&nodes_path)?,
                secondary: Some(sha256_file(&rendered_path)?),
            };
            WorkspaceSession::new(&engine, &ctx.db)
                .run_matching(&components, &design_nodes, policy, &digests)
                .context("Failed to record matching run")?
        }
        None => {
            warn!(
                "no workspace at {}; matching without stored confirmations",
                root_path.display()
            );
            BoundsMatcher::new(engine.matching.clone()).match_components(
                &components,
                &design_nodes,
                policy,
            )
        }
    };

    let report_path = if report {
        let layout = WorkspaceLayout::new(&root_path);
        let path = write_report(&layout, "matching", &result)?;
        info!("wrote matching report to {}", path.display());
        Some(path)
    } else {
        None
    };

    if json {
        return print_json(&result);
    }

    print_matching(&result);
    if let Some(path) = report_path {
        println!("Report: {}", path.display());
    }
    Ok(())
}

fn print_matching(result: &MatchingResult) {
    println!("Matching (policy: {})", result.policy);
    println!(
        "  Components: {} matched, {} unmatched",
        result.matches.len(),
        result.unmatched_components.len()
    );
    println!("  Overall confidence: {:.1}", result.overall_confidence);

    for entry in &result.matches {
        let Some(best) = entry.best() else {
            continue;
        };
        let confirmed = match entry.confirmed.as_deref() {
            Some(id) if id == best.node_id => " (confirmed)".to_string(),
            Some(id) => format!(" (confirmed: {id})"),
            None => String::new(),
        };
        println!(
            "  - [{}] {} -> {} \"{}\" {:.1} {} [{}]{}",
            entry.component.index,
            entry.component.name,
            best.node_id,
            best.node_name,
            best.confidence,
            best.match_type.as_str(),
            best.reasons.join(", "),
            confirmed
        );
        for alt in entry.candidates.iter().skip(1) {
            println!("      alt {} \"{}\" {:.1}", alt.node_id, alt.node_name, alt.confidence);
        }
    }

    if !result.unmatched_components.is_empty() {
        println!("  Unmatched components:");
        for component in &result.unmatched_components {
            println!("  - [{}] {}", component.index, component.name);
        }
    }
    if !result.unmatched_nodes.is_empty() {
        println!("  Unmatched nodes: {}", result.unmatched_nodes.join(", "));
    }
}

/// Persist (or remove) a human confirmation for a component label.
pub fn confirm_command(root: &str, component: &str, node: Option<&str>, remove: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let ctx = WorkspaceContext::from_root(&root_path)?;

    if remove {
        let existed =
            ctx.db.delete_confirmation(component).context("Failed to delete confirmation")?;
        if existed {
            println!("Removed confirmation for '{component}'");
        } else {
            println!("No confirmation recorded for '{component}'");
        }
        return Ok(());
    }

    let node = node.ok_or_else(|| anyhow::anyhow!("--node is required unless --remove is set"))?;
    let record = ctx
        .session()
        .confirm(component, node)
        .context("Failed to store confirmation")?;
    println!("Confirmed:");
    println!("  Component: {}", record.component);
    println!("  Node: {}", record.node_id);
    println!("  At: {}", record.confirmed_at);
    Ok(())
}

/// List stored confirmations.
pub fn confirmations_command(root: &str, json: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let ctx = WorkspaceContext::from_root(&root_path)?;
    let confirmations = ctx.db.list_confirmations().context("Failed to list confirmations")?;

    if json {
        return print_json(&confirmations);
    }

    println!("Confirmations ({}):", confirmations.len());
    if confirmations.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for record in confirmations {
        println!("  - {} -> {} ({})", record.component, record.node_id, record.confirmed_at);
    }
    Ok(())
}

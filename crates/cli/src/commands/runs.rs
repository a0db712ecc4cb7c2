use anyhow::{anyhow, Context, Result};
use bridge_core::db::{RunKind, WorkspaceContext};

use crate::canonicalize_or_current;
use crate::commands::print_json;

/// List recorded matching/grouping runs, optionally filtered by kind.
pub fn runs_command(root: &str, kind: Option<&str>, json: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let ctx = WorkspaceContext::from_root(&root_path)?;
    let kind = kind.map(|k| k.parse::<RunKind>().map_err(|e| anyhow!(e))).transpose()?;
    let runs = ctx.db.list_runs(kind).context("Failed to list runs")?;

    if json {
        return print_json(&runs);
    }

    println!("Runs ({}):", runs.len());
    if runs.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for run in runs {
        let policy = run.policy.as_deref().map(|p| format!(" [{p}]")).unwrap_or_default();
        println!(
            "  - {}{} confidence={:.2} resolved={} unresolved={} finished={}",
            run.kind, policy, run.overall_confidence, run.resolved, run.unresolved, run.finished_at
        );
    }
    Ok(())
}

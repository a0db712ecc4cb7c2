use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bridge_core::config::{load_engine_config, EngineConfig};
use bridge_core::db::{WorkspaceContext, WorkspaceLayout};
use chrono::Utc;
use serde::Serialize;

use crate::resolve_input;

/// Helper to print whether a directory exists.
pub fn print_dir_status(label: &str, path: &Path) {
    let exists = path.is_dir();
    println!("- {label}: {} ({})", if exists { "OK" } else { "MISSING" }, path.display());
}

/// Open the workspace at `root` if it has been initialized.
pub fn optional_context(root: &Path) -> Result<Option<WorkspaceContext>> {
    let layout = WorkspaceLayout::new(root);
    if !layout.is_initialized() {
        return Ok(None);
    }
    WorkspaceContext::from_root(root).map(Some)
}

/// Engine settings for a run: an explicit `--config` file wins, then the
/// workspace config, then built-in defaults.
pub fn engine_config(
    root: &Path,
    ctx: Option<&WorkspaceContext>,
    config_file: Option<&str>,
) -> Result<EngineConfig> {
    if let Some(file) = config_file {
        return load_engine_config(&resolve_input(root, file));
    }
    Ok(ctx.map(|c| c.engine().clone()).unwrap_or_default())
}

/// Serialize `value` to pretty JSON and print it.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let serialized = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{serialized}");
    Ok(())
}

/// Write `value` as `reports/<kind>-<timestamp>.json` and return the path.
pub fn write_report<T: Serialize>(layout: &WorkspaceLayout, kind: &str, value: &T) -> Result<PathBuf> {
    fs::create_dir_all(&layout.reports_dir).with_context(|| {
        format!("Failed to create reports dir: {}", layout.reports_dir.display())
    })?;
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string();
    let path = layout.report_path(kind, &stamp);
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(path)
}

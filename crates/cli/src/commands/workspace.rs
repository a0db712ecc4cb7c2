use std::fs;

use anyhow::{Context, Result};
use bridge_core::config::EngineConfig;
use bridge_core::db::{WorkspaceConfig, WorkspaceContext, WorkspaceDb, WorkspaceLayout};
use serde::Serialize;

use crate::commands::{print_dir_status, print_json};
use crate::{canonicalize_or_current, infer_workspace_name};

#[derive(Serialize)]
pub struct WorkspaceInfoSnapshot {
    pub name: String,
    pub description: Option<String>,
    pub root: String,
    pub config_file: String,
    pub config_version: String,
    pub db_path: String,
    pub reports_dir: String,
    pub confirmations: usize,
    pub runs: usize,
    pub engine: EngineConfig,
}

/// Initialize a new workspace at `root`.
pub fn init_command(root: &str, name: Option<String>) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = WorkspaceLayout::new(&root_path);

    let workspace_name = name.unwrap_or_else(|| infer_workspace_name(&root_path));

    fs::create_dir_all(&layout.meta_dir)
        .with_context(|| format!("Failed to create meta dir: {}", layout.meta_dir.display()))?;
    fs::create_dir_all(&layout.reports_dir).with_context(|| {
        format!("Failed to create reports dir: {}", layout.reports_dir.display())
    })?;

    let config = WorkspaceConfig::new(&workspace_name, layout.db_path_relative_string());
    let json = serde_json::to_string_pretty(&config)?;
    fs::write(&layout.config_path, json).with_context(|| {
        format!("Failed to write workspace config: {}", layout.config_path.display())
    })?;

    // Create the database now so later commands can rely on it.
    WorkspaceDb::open(&layout.db_path).with_context(|| {
        format!("Failed to initialize workspace database at {}", layout.db_path.display())
    })?;

    println!("Initialized design-bridge workspace:");
    println!("  Name: {}", workspace_name);
    println!("  Root: {}", layout.root.display());
    println!("  Config: {}", layout.config_path.display());
    println!("  DB path (relative): {}", config.db.path);
    println!("  Reports dir: {}", layout.reports_dir.display());

    Ok(())
}

/// Show information about an existing workspace.
pub fn info_command(root: &str, json: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let ctx = WorkspaceContext::from_root(&root_path)?;
    let confirmations = ctx.db.list_confirmations().context("Failed to list confirmations")?;
    let runs = ctx.db.list_runs(None).context("Failed to list runs")?;

    if json {
        let snapshot = WorkspaceInfoSnapshot {
            name: ctx.config.name.clone(),
            description: ctx.config.description.clone(),
            root: ctx.layout.root.display().to_string(),
            config_file: ctx.layout.config_path.display().to_string(),
            config_version: ctx.config.config_version.clone(),
            db_path: ctx.db_path.display().to_string(),
            reports_dir: ctx.layout.reports_dir.display().to_string(),
            confirmations: confirmations.len(),
            runs: runs.len(),
            engine: ctx.config.engine.clone(),
        };
        return print_json(&snapshot);
    }

    println!("Design Bridge Workspace Info");
    println!("============================");
    println!("Name: {}", ctx.config.name);
    if let Some(desc) = &ctx.config.description {
        println!("Description: {desc}");
    }
    println!("Root: {}", ctx.layout.root.display());
    println!("Config file: {}", ctx.layout.config_path.display());
    println!("Config version: {}", ctx.config.config_version);
    println!("DB path: {}", ctx.db_path.display());
    println!("Confirmations: {}", confirmations.len());
    println!("Runs: {}", runs.len());
    println!(
        "Matching: min confidence {}, top-k {}",
        ctx.config.engine.matching.min_confidence, ctx.config.engine.matching.top_k
    );
    println!();

    println!("Directories:");
    print_dir_status("Meta dir (.bridge)", &ctx.layout.meta_dir);
    print_dir_status("Reports dir", &ctx.layout.reports_dir);

    Ok(())
}

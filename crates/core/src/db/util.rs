use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::db::{WorkspaceConfig, WorkspaceDb, WorkspaceLayout};

/// Read and parse `.bridge/workspace.json` for a given layout.
pub fn load_workspace_config(layout: &WorkspaceLayout) -> Result<WorkspaceConfig> {
    let path = &layout.config_path;
    let config_json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read workspace config at {}", path.display()))?;
    serde_json::from_str(&config_json).with_context(|| {
        format!(
            "Workspace config at {} is not valid; fix it or re-run `design-bridge init`",
            path.display()
        )
    })
}

/// The configured database path; relative paths are taken from the workspace root.
pub fn resolve_db_path(layout: &WorkspaceLayout, config: &WorkspaceConfig) -> PathBuf {
    let configured = Path::new(&config.db.path);
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        layout.root.join(configured)
    }
}

/// Load the config, then open (and migrate) the database it points at.
pub fn open_workspace_db(
    layout: &WorkspaceLayout,
) -> Result<(WorkspaceConfig, PathBuf, WorkspaceDb)> {
    let config = load_workspace_config(layout)?;
    let db_path = resolve_db_path(layout, &config);
    let db = WorkspaceDb::open(&db_path).with_context(|| {
        format!("Failed to open workspace '{}' database at {}", config.name, db_path.display())
    })?;
    Ok((config, db_path, db))
}

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::config::EngineConfig;
use crate::db::{open_workspace_db, WorkspaceConfig, WorkspaceDb, WorkspaceLayout};
use crate::services::WorkspaceSession;

/// An initialized design-bridge workspace: its layout, its config, and the
/// open confirmations/runs database.
#[derive(Debug)]
pub struct WorkspaceContext {
    pub layout: WorkspaceLayout,
    pub config: WorkspaceConfig,
    pub db_path: PathBuf,
    pub db: WorkspaceDb,
}

impl WorkspaceContext {
    /// Open the workspace rooted at `root`. Fails with a pointer to
    /// `design-bridge init` when the root holds no workspace config.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self> {
        let layout = WorkspaceLayout::new(root);
        if !layout.is_initialized() {
            bail!(
                "No design-bridge workspace at {} (missing {}); run `design-bridge init` first",
                layout.root.display(),
                layout.config_path.display()
            );
        }
        let (config, db_path, db) = open_workspace_db(&layout)?;
        Ok(Self { layout, config, db_path, db })
    }

    /// Scoring and grouping settings stored with the workspace.
    pub fn engine(&self) -> &EngineConfig {
        &self.config.engine
    }

    /// A session that replays this workspace's confirmations and records runs.
    pub fn session(&self) -> WorkspaceSession<'_> {
        WorkspaceSession::new(self.engine(), &self.db)
    }
}

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Database location inside a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbConfig {
    /// Path to the workspace database file (typically relative to the workspace root).
    pub path: String,
}

impl DbConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Serializable configuration describing a workspace.
///
/// This lives at `.bridge/workspace.json` in the workspace root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Human-friendly workspace name (usually the screen or app being mapped).
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Config format version, not the crate version.
    pub config_version: String,
    pub db: DbConfig,
    /// Engine tuning; omitted keys fall back to defaults.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl WorkspaceConfig {
    /// Create a workspace configuration using the given name and db path.
    pub fn new(name: impl Into<String>, db_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            config_version: "0.1.0".to_string(),
            db: DbConfig::new(db_path),
            engine: EngineConfig::default(),
        }
    }
}

//! Workspace layout, configuration, and the SQLite confirmation store.
//!
//! The engine itself never touches the filesystem; this module is the
//! persistence edge used by frontends:
//! - `WorkspaceLayout`: computed paths for workspace directories/files.
//! - `WorkspaceConfig`: serializable workspace metadata plus `EngineConfig`.
//! - `WorkspaceDb`: a small SQLite wrapper holding human confirmations and a
//!   log of matching/grouping runs.
//! - `WorkspaceContext`: layout + config + open database in one value.

mod config;
mod context;
mod layout;
mod models;
mod util;
mod workspace_db;

pub use config::{DbConfig, WorkspaceConfig};
pub use context::WorkspaceContext;
pub use layout::WorkspaceLayout;
pub use models::{ConfirmationRecord, RunKind, RunRecord};
pub use util::{load_workspace_config, open_workspace_db, resolve_db_path};
pub use workspace_db::{DbError, DbResult, WorkspaceDb, CURRENT_SCHEMA_VERSION};

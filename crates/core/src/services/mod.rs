//! Services that tie the pure engines to a workspace database.

pub mod session;

pub use session::{InputDigests, WorkspaceSession};

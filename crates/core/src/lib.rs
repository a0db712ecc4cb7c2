//! bridge-core
//!
//! Core library for reconnecting a generated rendering of a screen with the
//! design-tool document it was produced from.
//!
//! This crate defines the data model shared by both sides, the geometry
//! primitives, the candidate scoring and matching engine, the semantic
//! grouping engine, and the small workspace/database layer used to persist
//! human confirmations between runs.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, editor plugins, etc.).

pub mod config;
pub mod db;
pub mod grouping;
pub mod matching;
pub mod model;
pub mod services;
pub mod spatial;
mod text;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

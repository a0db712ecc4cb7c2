//! Clustering design nodes into semantic UI sections.
//!
//! - `scorer`: `GroupScorer`, the four-heuristic auto-mapping for groups
//!   proposed without members.
//! - `grouper`: `SemanticGrouper`, validates proposals, runs auto-mapping, and
//!   falls back to a 1:1 partition when nothing was proposed.
//! - `summary`: reading-order layout summary over completed groups.

pub mod grouper;
pub mod scorer;
pub mod summary;

pub use grouper::SemanticGrouper;
pub use scorer::{Band, GroupScorer, Heuristic, ScoredNode};
pub use summary::summarize_layout;

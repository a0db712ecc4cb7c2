//! Core data model shared by the matching and grouping engines.
//!
//! - Geometry (`Bounds`, `Axis`, the `HasBounds` accessor trait)
//! - Design-side nodes (`DesignNode`, `NodeCategory`, `VisualAttributes`)
//! - Render-side elements (`RenderedBounds`, `StyleSnapshot`, `ElementHandle`)
//! - Matching output (`MatchCandidate`, `MatchingResult`)
//! - Grouping input and output (`GroupSkeleton`, `SemanticGroup`, `GroupingResult`)

mod geometry;
mod groups;
mod nodes;
mod results;

pub use geometry::{Axis, Bounds, HasBounds};
pub use groups::{GroupCategory, GroupSkeleton, GroupingResult, LayoutSummary, SemanticGroup};
pub use nodes::{
    ComponentSnapshot, DesignNode, ElementHandle, NodeCategory, RenderedBounds, StyleSnapshot,
    VisualAttributes,
};
pub use results::{
    ComponentMatches, ComponentRef, MatchCandidate, MatchError, MatchPolicy, MatchType,
    MatchingResult, ScoreBreakdown,
};

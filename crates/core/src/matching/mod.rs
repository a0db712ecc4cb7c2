//! Matching rendered elements back to design nodes.
//!
//! - `rules`: the enumerable (keyword, node category, score) table.
//! - `scorer`: `MatchScorer`, four capped heuristics for one pair.
//! - `matcher`: `BoundsMatcher`, ranks every component under a `MatchPolicy`.

pub mod matcher;
pub mod rules;
pub mod scorer;

pub use matcher::{BoundsMatcher, NodePool};
pub use rules::{best_category_rule, CategoryRule, CATEGORY_RULES};
pub use scorer::MatchScorer;

//! Engine configuration.
//!
//! All knobs are serde-friendly with defaults, so a partial YAML/JSON file
//! only needs to name what it overrides. `WorkspaceConfig` (see `db`) embeds
//! an `EngineConfig`; frontends may also load one from a standalone file.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::GroupCategory;

/// Top-level engine settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub matching: MatchConfig,
    pub grouping: GroupingConfig,
}

/// Settings for `MatchScorer` and `BoundsMatcher`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Candidates below this confidence are dropped.
    pub min_confidence: f64,
    /// Candidates kept per component.
    pub top_k: usize,
    pub text_cap: f64,
    pub category_cap: f64,
    pub visual_cap: f64,
    /// Points per visual indicator present on both sides.
    pub visual_increment: f64,
    pub size_cap: f64,
    /// Multiplier applied to `size_cap`; layouts reflow, so size counts for less.
    pub size_weight: f64,
    /// Pre-confirm rank-1 candidates at or above this confidence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_confirm_threshold: Option<f64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_confidence: 20.0,
            top_k: 3,
            text_cap: 40.0,
            category_cap: 30.0,
            visual_cap: 20.0,
            visual_increment: 5.0,
            size_cap: 20.0,
            size_weight: 0.75,
            auto_confirm_threshold: None,
        }
    }
}

/// Maximum members an auto-mapped group may receive, per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberLimits {
    pub button: usize,
    pub text: usize,
    pub card: usize,
    pub navigation: usize,
    pub input: usize,
    pub list: usize,
    pub image: usize,
    pub container: usize,
    pub other: usize,
}

impl Default for MemberLimits {
    fn default() -> Self {
        Self {
            button: 3,
            text: 5,
            card: 12,
            navigation: 12,
            input: 4,
            list: 20,
            image: 3,
            container: 25,
            other: 8,
        }
    }
}

impl MemberLimits {
    pub fn for_category(&self, category: GroupCategory) -> usize {
        match category {
            GroupCategory::Button => self.button,
            GroupCategory::Text => self.text,
            GroupCategory::Card => self.card,
            GroupCategory::Navigation => self.navigation,
            GroupCategory::Input => self.input,
            GroupCategory::List => self.list,
            GroupCategory::Image => self.image,
            GroupCategory::Container => self.container,
            GroupCategory::Other => self.other,
        }
    }
}

/// Settings for `GroupScorer` and `SemanticGrouper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    pub keyword_weight: f64,
    pub position_weight: f64,
    pub category_weight: f64,
    pub proximity_weight: f64,
    /// Bonus for nodes whose area clears `min_node_area`.
    pub size_bonus: f64,
    pub min_node_area: f64,
    /// Shortest token that counts for keyword overlap.
    pub min_keyword_len: usize,
    /// Pixel tolerance around a "section" group's declared `y`.
    pub section_tolerance: f64,
    /// Pixel radius around a group's declared bounds.
    pub proximity_radius: f64,
    /// Width-to-height ratio above which a rectangle reads as button-like.
    pub wide_aspect_ratio: f64,
    pub member_limits: MemberLimits,
    /// Confidence assumed when a proposed group carries none.
    pub default_confidence: f64,
    /// Upper bound on groups produced by the 1:1 fallback.
    pub max_fallback_groups: usize,
    /// Confidence of each 1:1 fallback group.
    pub fallback_confidence: f64,
    /// Gap separating vertical sections in the fallback and the layout summary.
    pub section_gap: f64,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            keyword_weight: 3.0,
            position_weight: 2.0,
            category_weight: 2.0,
            proximity_weight: 1.0,
            size_bonus: 0.5,
            min_node_area: 16.0,
            min_keyword_len: 3,
            section_tolerance: 100.0,
            proximity_radius: 50.0,
            wide_aspect_ratio: 2.0,
            member_limits: MemberLimits::default(),
            default_confidence: 0.6,
            max_fallback_groups: 50,
            fallback_confidence: 0.5,
            section_gap: 24.0,
        }
    }
}

impl GroupingConfig {
    /// Highest score a single node can reach.
    pub fn max_node_score(&self) -> f64 {
        self.keyword_weight
            + self.position_weight
            + self.category_weight
            + self.proximity_weight
            + self.size_bonus
    }
}

/// Load an `EngineConfig` from a YAML (`.yaml`/`.yml`) or JSON (`.json`) file.
pub fn load_engine_config(path: &Path) -> Result<EngineConfig> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read engine config at {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_lowercase();
    let config = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&body)
            .with_context(|| format!("Failed to parse YAML engine config {}", path.display()))?,
        "json" => serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse JSON engine config {}", path.display()))?,
        other => {
            return Err(anyhow!(
                "Unsupported engine config format '{other}' for {}; use .yaml, .yml, or .json",
                path.display()
            ))
        }
    };
    Ok(config)
}

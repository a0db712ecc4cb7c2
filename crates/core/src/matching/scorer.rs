use log::trace;

use crate::config::MatchConfig;
use crate::matching::rules::best_category_rule;
use crate::model::{
    Bounds, ComponentSnapshot, DesignNode, MatchCandidate, MatchType, ScoreBreakdown,
};
use crate::text::{normalize, tokens};

/// Reason thresholds: a sub-score above its threshold is listed in `reasons`.
const TEXT_REASON_THRESHOLD: f64 = 20.0;
const CATEGORY_REASON_THRESHOLD: f64 = 15.0;
const VISUAL_REASON_THRESHOLD: f64 = 10.0;

/// Share of the text cap awarded for containment in either direction.
const CONTAINMENT_SHARE: f64 = 0.75;
/// Ceiling on the share of the text cap awarded for partial token overlap.
const TOKEN_OVERLAP_SHARE: f64 = 0.625;

/// Scores one (rendered element, design node) pair.
///
/// Pure: works on a `ComponentSnapshot`, so any live handle has already been
/// queried by the caller.
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    config: MatchConfig,
}

impl MatchScorer {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Score `component` (the element at `component_index`) against `node`.
    pub fn score(
        &self,
        component_index: usize,
        component: &ComponentSnapshot,
        node: &DesignNode,
    ) -> MatchCandidate {
        let rule = best_category_rule(&component.name, node.category);
        let scores = ScoreBreakdown {
            text: self.text_score(component, node),
            category: rule.score.min(self.config.category_cap).max(0.0),
            visual: self.visual_score(component, node),
            size: self.size_score(&component.bounds, &node.bounds),
            category_rule: rule.name.to_string(),
        };

        let confidence = scores.total().clamp(0.0, 100.0);
        let reasons = self.reasons(&scores);
        trace!(
            "score component={} node={} text={:.1} category={:.1} visual={:.1} size={:.1} total={:.1}",
            component.name,
            node.id,
            scores.text,
            scores.category,
            scores.visual,
            scores.size,
            confidence
        );

        MatchCandidate {
            component_index,
            component_name: component.name.clone(),
            node_id: node.id.clone(),
            node_name: node.name.clone(),
            scores,
            confidence,
            match_type: MatchType::from_confidence(confidence),
            reasons,
        }
    }

    /// Best text similarity over every (component label, node label) pairing.
    pub fn text_score(&self, component: &ComponentSnapshot, node: &DesignNode) -> f64 {
        let node_labels = node.labels();
        component
            .labels()
            .into_iter()
            .flat_map(|left| node_labels.iter().map(move |right| (left, *right)))
            .map(|(left, right)| text_similarity(left, right, self.config.text_cap))
            .fold(0.0, f64::max)
    }

    /// Fixed increment per style indicator present on both sides.
    pub fn visual_score(&self, component: &ComponentSnapshot, node: &DesignNode) -> f64 {
        let shared = component.style.indicators().shared_count(&node.visual_attributes);
        (shared as f64 * self.config.visual_increment).min(self.config.visual_cap)
    }

    /// Weighted mean of the width and height min/max ratios.
    pub fn size_score(&self, component: &Bounds, node: &Bounds) -> f64 {
        size_ratio(component, node) * self.effective_size_cap()
    }

    fn effective_size_cap(&self) -> f64 {
        self.config.size_cap * self.config.size_weight
    }

    fn reasons(&self, scores: &ScoreBreakdown) -> Vec<String> {
        let mut reasons = Vec::new();
        if scores.text > TEXT_REASON_THRESHOLD {
            reasons.push("text".to_string());
        }
        if scores.category > CATEGORY_REASON_THRESHOLD {
            reasons.push(format!("category:{}", scores.category_rule));
        }
        if scores.visual > VISUAL_REASON_THRESHOLD {
            reasons.push("visual".to_string());
        }
        // Break-even: dimensions agree better than half way.
        if scores.size > self.effective_size_cap() / 2.0 {
            reasons.push("size".to_string());
        }
        reasons
    }
}

/// Similarity of two labels, in `[0, cap]`.
pub fn text_similarity(component: &str, node: &str, cap: f64) -> f64 {
    let left = normalize(component);
    let right = normalize(node);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    if left == right {
        return cap;
    }
    if left.contains(&right) || right.contains(&left) {
        return cap * CONTAINMENT_SHARE;
    }

    let left_tokens = tokens(&left);
    if left_tokens.is_empty() {
        return 0.0;
    }
    let right_tokens = tokens(&right);
    let shared = left_tokens.iter().filter(|t| right_tokens.contains(t)).count();
    shared as f64 / left_tokens.len() as f64 * cap * TOKEN_OVERLAP_SHARE
}

/// Mean of `min/max` for width and height; 0 when any dimension is not positive.
pub fn size_ratio(a: &Bounds, b: &Bounds) -> f64 {
    fn ratio(x: f64, y: f64) -> Option<f64> {
        if x > 0.0 && y > 0.0 {
            Some(x.min(y) / x.max(y))
        } else {
            None
        }
    }

    match (ratio(a.width, b.width), ratio(a.height, b.height)) {
        (Some(w), Some(h)) => (w + h) / 2.0,
        _ => 0.0,
    }
}

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::Bounds;

/// Coarse label derived from a candidate's confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Partial,
    Approximate,
}

impl MatchType {
    /// `> 80` is exact, `(60, 80]` is partial, anything else approximate.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 80.0 {
            MatchType::Exact
        } else if confidence > 60.0 {
            MatchType::Partial
        } else {
            MatchType::Approximate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Partial => "partial",
            MatchType::Approximate => "approximate",
        }
    }
}

/// Per-heuristic contributions to a candidate's confidence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub text: f64,
    pub category: f64,
    pub visual: f64,
    pub size: f64,
    /// Name of the category rule that produced `category`.
    pub category_rule: String,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.text + self.category + self.visual + self.size
    }
}

/// A scored pairing of one rendered element with one design node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub component_index: usize,
    pub component_name: String,
    pub node_id: String,
    pub node_name: String,
    pub scores: ScoreBreakdown,
    pub confidence: f64,
    pub match_type: MatchType,
    pub reasons: Vec<String>,
}

/// Identifies a rendered element by its position in the input list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRef {
    pub index: usize,
    pub name: String,
}

/// Ranked candidates for one rendered element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMatches {
    pub component: ComponentRef,
    pub bounds: Bounds,
    /// Best first, at most `top_k` entries, never empty.
    pub candidates: Vec<MatchCandidate>,
    /// Node id confirmed by a human or by auto-confirmation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<String>,
}

impl ComponentMatches {
    /// The rank-1 candidate.
    pub fn best(&self) -> Option<&MatchCandidate> {
        self.candidates.first()
    }

    pub fn confirmed_candidate(&self) -> Option<&MatchCandidate> {
        let id = self.confirmed.as_deref()?;
        self.candidates.iter().find(|c| c.node_id == id)
    }
}

/// How the candidate pool evolves while components are processed in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Each component's rank-1 node is withdrawn before the next component is scored.
    #[default]
    Exclusive,
    /// Every component ranks against the full node list; collisions are allowed.
    TopK,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::Exclusive => "exclusive",
            MatchPolicy::TopK => "top-k",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = MatchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "exclusive" | "exclusive-greedy" | "greedy" => Ok(MatchPolicy::Exclusive),
            "top-k" | "topk" | "non-exclusive" => Ok(MatchPolicy::TopK),
            other => Err(MatchError::UnknownPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Component {0} has no candidates above the relevance threshold")]
    ComponentNotMatched(usize),
    #[error("Node {node_id} is not a candidate for component {component}")]
    NotACandidate { component: usize, node_id: String },
    #[error("Unknown match policy '{0}'; expected 'exclusive' or 'top-k'")]
    UnknownPolicy(String),
}

/// Output of one matching run.
///
/// With `MatchPolicy::Exclusive` no node id is rank-1 for two components.
/// With `MatchPolicy::TopK` that does not hold and `unmatched_nodes` is
/// informative only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingResult {
    pub policy: MatchPolicy,
    pub matches: Vec<ComponentMatches>,
    pub unmatched_components: Vec<ComponentRef>,
    /// Ids of nodes that are rank-1 for no component, in input order.
    pub unmatched_nodes: Vec<String>,
    /// Mean rank-1 confidence over matched components, 0 when none matched.
    pub overall_confidence: f64,
}

impl MatchingResult {
    pub fn for_component(&self, index: usize) -> Option<&ComponentMatches> {
        self.matches.iter().find(|m| m.component.index == index)
    }

    /// Rank-1 node id per matched component, in component order.
    pub fn best_node_ids(&self) -> Vec<&str> {
        self.matches.iter().filter_map(|m| m.best()).map(|c| c.node_id.as_str()).collect()
    }

    /// Mark `node_id` as the confirmed match for the component at `index`.
    pub fn confirm(&mut self, index: usize, node_id: &str) -> Result<(), MatchError> {
        let entry = self
            .matches
            .iter_mut()
            .find(|m| m.component.index == index)
            .ok_or(MatchError::ComponentNotMatched(index))?;
        if !entry.candidates.iter().any(|c| c.node_id == node_id) {
            return Err(MatchError::NotACandidate {
                component: index,
                node_id: node_id.to_string(),
            });
        }
        entry.confirmed = Some(node_id.to_string());
        Ok(())
    }

    /// Confirm `node_id` for every component labelled `name` that lists it as a
    /// candidate. Under the exclusive policy a node is confirmed for at most one
    /// component, so later twins are skipped once it is taken. Returns how many
    /// components were confirmed.
    pub fn confirm_by_name(&mut self, name: &str, node_id: &str) -> usize {
        let exclusive = self.policy == MatchPolicy::Exclusive;
        let mut confirmed = 0;
        for i in 0..self.matches.len() {
            let entry = &self.matches[i];
            let listed = entry.candidates.iter().any(|c| c.node_id == node_id);
            if entry.component.name != name || !listed {
                continue;
            }
            let taken = self
                .matches
                .iter()
                .enumerate()
                .any(|(j, m)| j != i && m.confirmed.as_deref() == Some(node_id));
            if exclusive && taken {
                debug!(
                    "skip confirmation for component #{} '{}': node {} already confirmed elsewhere",
                    entry.component.index, name, node_id
                );
                continue;
            }
            self.matches[i].confirmed = Some(node_id.to_string());
            confirmed += 1;
        }
        confirmed
    }

    pub fn confirmed_count(&self) -> usize {
        self.matches.iter().filter(|m| m.confirmed.is_some()).count()
    }
}

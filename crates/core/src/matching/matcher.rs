use std::collections::HashSet;

use log::{debug, info};

use crate::config::MatchConfig;
use crate::matching::scorer::MatchScorer;
use crate::model::{
    ComponentMatches, ComponentRef, ComponentSnapshot, DesignNode, MatchCandidate, MatchPolicy,
    MatchingResult, RenderedBounds,
};

/// Design nodes still available to the next component.
///
/// Passed by value through the matching fold; never shared or mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePool<'a> {
    nodes: Vec<&'a DesignNode>,
}

impl<'a> NodePool<'a> {
    pub fn new(nodes: &'a [DesignNode]) -> Self {
        Self { nodes: nodes.iter().collect() }
    }

    /// The pool minus the node with `id`.
    pub fn without(self, id: &str) -> Self {
        Self { nodes: self.nodes.into_iter().filter(|n| n.id != id).collect() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a DesignNode> + '_ {
        self.nodes.iter().copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl MatchPolicy {
    /// Pool handed to the next component once `chosen` became this component's rank-1.
    pub fn next_pool<'a>(&self, pool: NodePool<'a>, chosen: Option<&str>) -> NodePool<'a> {
        match (self, chosen) {
            (MatchPolicy::Exclusive, Some(id)) => pool.without(id),
            _ => pool,
        }
    }
}

/// Ranks design-node candidates for every rendered element.
///
/// Components are processed in input order. Under `MatchPolicy::Exclusive`
/// that order is a priority: earlier components claim their rank-1 node first.
/// No global assignment is attempted.
#[derive(Debug, Clone, Default)]
pub struct BoundsMatcher {
    scorer: MatchScorer,
}

impl BoundsMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { scorer: MatchScorer::new(config) }
    }

    pub fn config(&self) -> &MatchConfig {
        self.scorer.config()
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }

    /// Match every component against `nodes` under `policy`.
    pub fn match_components(
        &self,
        components: &[RenderedBounds],
        nodes: &[DesignNode],
        policy: MatchPolicy,
    ) -> MatchingResult {
        // Each live handle is queried once, before any scoring.
        let snapshots: Vec<ComponentSnapshot> =
            components.iter().map(RenderedBounds::snapshot).collect();

        let (_, ranked) = snapshots.iter().enumerate().fold(
            (NodePool::new(nodes), Vec::with_capacity(snapshots.len())),
            |(pool, mut ranked), (index, snapshot)| {
                let candidates = self.rank_candidates(index, snapshot, &pool);
                let chosen = candidates.first().map(|c| c.node_id.clone());
                debug!(
                    "component #{index} '{}' -> {} candidate(s), rank-1 {:?} (pool {})",
                    snapshot.name,
                    candidates.len(),
                    chosen,
                    pool.len()
                );
                ranked.push(candidates);
                (policy.next_pool(pool, chosen.as_deref()), ranked)
            },
        );

        let result = self.assemble(&snapshots, nodes, policy, ranked);
        info!(
            "matched {}/{} component(s) under {} policy, overall confidence {:.1}",
            result.matches.len(),
            components.len(),
            policy,
            result.overall_confidence
        );
        result
    }

    /// Score one component against the pool, drop irrelevant pairs, keep the top K.
    ///
    /// Ties keep pool order, so results are deterministic.
    pub fn rank_candidates(
        &self,
        index: usize,
        snapshot: &ComponentSnapshot,
        pool: &NodePool<'_>,
    ) -> Vec<MatchCandidate> {
        let config = self.scorer.config();
        let mut candidates: Vec<MatchCandidate> = pool
            .iter()
            .map(|node| self.scorer.score(index, snapshot, node))
            .filter(|c| c.confidence >= config.min_confidence)
            .collect();
        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        candidates.truncate(config.top_k);
        candidates
    }

    fn assemble(
        &self,
        snapshots: &[ComponentSnapshot],
        nodes: &[DesignNode],
        policy: MatchPolicy,
        ranked: Vec<Vec<MatchCandidate>>,
    ) -> MatchingResult {
        let auto_confirm = self.scorer.config().auto_confirm_threshold;
        let mut matches = Vec::new();
        let mut unmatched_components = Vec::new();

        for ((index, snapshot), candidates) in snapshots.iter().enumerate().zip(ranked) {
            let component = ComponentRef { index, name: snapshot.name.clone() };
            if candidates.is_empty() {
                unmatched_components.push(component);
                continue;
            }
            let confirmed = match (auto_confirm, candidates.first()) {
                (Some(threshold), Some(best)) if best.confidence >= threshold => {
                    Some(best.node_id.clone())
                }
                _ => None,
            };
            matches.push(ComponentMatches {
                component,
                bounds: snapshot.bounds,
                candidates,
                confirmed,
            });
        }

        let best_ids: HashSet<&str> =
            matches.iter().filter_map(|m| m.best()).map(|c| c.node_id.as_str()).collect();
        let unmatched_nodes =
            nodes.iter().filter(|n| !best_ids.contains(n.id.as_str())).map(|n| n.id.clone()).collect();

        let overall_confidence = if matches.is_empty() {
            0.0
        } else {
            matches.iter().filter_map(|m| m.best()).map(|c| c.confidence).sum::<f64>()
                / matches.len() as f64
        };

        MatchingResult { policy, matches, unmatched_components, unmatched_nodes, overall_confidence }
    }
}

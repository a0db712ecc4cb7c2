use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Instant;

use log::{debug, info, warn};
use serde_json::json;

use crate::config::GroupingConfig;
use crate::grouping::scorer::GroupScorer;
use crate::grouping::summary::summarize_layout;
use crate::model::{Bounds, DesignNode, GroupCategory, GroupSkeleton, GroupingResult, SemanticGroup};
use crate::spatial::vertical_sections;

const MIN_GROUP_CONFIDENCE: f64 = 0.1;
const MAX_GROUP_CONFIDENCE: f64 = 1.0;

/// Turns a node list, plus optional externally proposed groups, into completed
/// semantic groups.
///
/// - Proposed groups with children are validated and passed through.
/// - Proposed groups without children are auto-mapped by `GroupScorer`, in
///   input order, each drawing from the nodes earlier groups left behind.
/// - With no proposal at all, every node becomes its own group.
#[derive(Debug, Clone, Default)]
pub struct SemanticGrouper {
    config: GroupingConfig,
}

impl SemanticGrouper {
    pub fn new(config: GroupingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    pub fn group(
        &self,
        nodes: &[DesignNode],
        proposed: Option<&[GroupSkeleton]>,
    ) -> GroupingResult {
        let started = Instant::now();
        let groups = match proposed {
            Some(skeletons) => self.complete(nodes, skeletons),
            None => self.fallback(nodes),
        };

        let grouped: HashSet<&str> =
            groups.iter().flat_map(|g| g.children.iter().map(String::as_str)).collect();
        let ungrouped_nodes: Vec<String> =
            nodes.iter().filter(|n| !grouped.contains(n.id.as_str())).map(|n| n.id.clone()).collect();
        let overall_confidence = if groups.is_empty() {
            0.0
        } else {
            groups.iter().map(|g| g.confidence).sum::<f64>() / groups.len() as f64
        };
        let layout_summary = summarize_layout(&groups, self.config.section_gap);

        info!(
            "grouped {} node(s) into {} group(s), {} ungrouped",
            nodes.len(),
            groups.len(),
            ungrouped_nodes.len()
        );

        GroupingResult {
            groups,
            layout_summary,
            ungrouped_nodes,
            overall_confidence,
            elapsed_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Validate proposed groups and auto-map the ones without members.
    fn complete(&self, nodes: &[DesignNode], skeletons: &[GroupSkeleton]) -> Vec<SemanticGroup> {
        let by_id: HashMap<&str, &DesignNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        let validated: Vec<Vec<&DesignNode>> =
            skeletons.iter().map(|skeleton| validate_children(skeleton, &by_id)).collect();

        // Members named by the classifier are never offered to auto-mapping.
        let claimed: HashSet<&str> =
            validated.iter().flatten().map(|n| n.id.as_str()).collect();
        let pool: Vec<&DesignNode> =
            nodes.iter().filter(|n| !claimed.contains(n.id.as_str())).collect();

        let scorer = GroupScorer::new(&self.config, nodes);
        let (_, groups) = skeletons.iter().zip(validated).enumerate().fold(
            (pool, Vec::with_capacity(skeletons.len())),
            |(pool, mut groups), (index, (skeleton, children))| {
                let id = skeleton.id.clone().unwrap_or_else(|| format!("group-{}", index + 1));
                if !children.is_empty() {
                    groups.push(self.provided_group(id, skeleton, &children));
                    return (pool, groups);
                }

                let chosen = scorer.select(skeleton, &pool);
                debug!(
                    "auto-mapped group '{}' -> {} of {} pooled node(s)",
                    skeleton.name,
                    chosen.len(),
                    pool.len()
                );
                let taken: HashSet<&str> = chosen.iter().map(|s| s.node.id.as_str()).collect();
                let members: Vec<&DesignNode> = chosen.iter().map(|s| s.node).collect();
                let mean_score = if chosen.is_empty() {
                    0.0
                } else {
                    chosen.iter().map(|s| s.score).sum::<f64>() / chosen.len() as f64
                };
                groups.push(self.auto_group(id, skeleton, &members, mean_score));

                let remaining = pool.into_iter().filter(|n| !taken.contains(n.id.as_str())).collect();
                (remaining, groups)
            },
        );
        groups
    }

    fn provided_group(
        &self,
        id: String,
        skeleton: &GroupSkeleton,
        children: &[&DesignNode],
    ) -> SemanticGroup {
        let declared = skeleton.confidence.unwrap_or(self.config.default_confidence);
        let confidence = clamp_confidence(declared);
        if confidence != declared {
            warn!("group '{}' confidence {declared} clamped to {confidence}", skeleton.name);
        }
        build_group(id, skeleton, children, "provided", confidence)
    }

    fn auto_group(
        &self,
        id: String,
        skeleton: &GroupSkeleton,
        members: &[&DesignNode],
        mean_score: f64,
    ) -> SemanticGroup {
        if members.is_empty() {
            return build_group(id, skeleton, members, "unassigned", MIN_GROUP_CONFIDENCE);
        }
        let max = self.config.max_node_score();
        let confidence = if max > 0.0 { clamp_confidence(mean_score / max) } else { MIN_GROUP_CONFIDENCE };
        build_group(id, skeleton, members, "auto", confidence)
    }

    /// One group per node, in reading order, capped at `max_fallback_groups`.
    fn fallback(&self, nodes: &[DesignNode]) -> Vec<SemanticGroup> {
        vertical_sections(nodes, self.config.section_gap)
            .into_iter()
            .enumerate()
            .flat_map(|(section, members)| members.into_iter().map(move |node| (section, node)))
            .take(self.config.max_fallback_groups)
            .map(|(section, node)| {
                let name = if node.name.trim().is_empty() { node.id.clone() } else { node.name.clone() };
                let mut properties = BTreeMap::new();
                properties.insert("mapping".to_string(), json!("fallback"));
                properties.insert("section".to_string(), json!(section));
                SemanticGroup {
                    id: format!("group-{}", node.id),
                    name,
                    category: GroupCategory::from_node_category(node.category),
                    bounds: node.bounds,
                    children: vec![node.id.clone()],
                    properties,
                    confidence: clamp_confidence(self.config.fallback_confidence),
                }
            })
            .collect()
    }
}

/// Keep only child ids that exist in the node list, dropping duplicates.
fn validate_children<'a>(
    skeleton: &GroupSkeleton,
    by_id: &HashMap<&str, &'a DesignNode>,
) -> Vec<&'a DesignNode> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for child in &skeleton.children {
        match by_id.get(child.as_str()) {
            Some(node) if seen.insert(child.as_str()) => out.push(*node),
            Some(_) => {}
            None => warn!("group '{}' references unknown node id '{child}'", skeleton.name),
        }
    }
    out
}

fn build_group(
    id: String,
    skeleton: &GroupSkeleton,
    members: &[&DesignNode],
    mapping: &str,
    confidence: f64,
) -> SemanticGroup {
    let bounds = Bounds::enclosing(members.iter().map(|n| &n.bounds))
        .or(skeleton.bounds)
        .unwrap_or_default();
    let mut properties = skeleton.properties.clone();
    properties.insert("mapping".to_string(), json!(mapping));
    SemanticGroup {
        id,
        name: skeleton.name.clone(),
        category: skeleton.resolved_category(),
        bounds,
        children: members.iter().map(|n| n.id.clone()).collect(),
        properties,
        confidence,
    }
}

fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_GROUP_CONFIDENCE;
    }
    value.clamp(MIN_GROUP_CONFIDENCE, MAX_GROUP_CONFIDENCE)
}

use std::collections::HashSet;

use serde::Serialize;

use crate::config::GroupingConfig;
use crate::model::{Bounds, DesignNode, GroupCategory, GroupSkeleton, NodeCategory};
use crate::text::{has_keyword, tokens, words};

/// Heuristics that can nominate a node for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    Keyword,
    Position,
    Category,
    Proximity,
}

/// Vertical band a group name points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    Top,
    Middle,
    Bottom,
    /// Within the section tolerance of this `y`.
    Near(f64),
}

const TOP_WORDS: &[&str] = &["header", "top", "topbar"];
const BOTTOM_WORDS: &[&str] = &["footer", "bottom", "bottombar", "action"];
const MIDDLE_WORDS: &[&str] = &["content", "main", "body"];
const SECTION_WORDS: &[&str] = &["section"];

/// A node nominated for a group, with the heuristics that picked it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredNode<'a> {
    pub node: &'a DesignNode,
    pub score: f64,
    pub heuristics: Vec<Heuristic>,
}

/// Proposes members for a group skeleton that arrived without children.
///
/// The scorer only reads the pool it is given; removing chosen nodes is the
/// caller's job.
#[derive(Debug, Clone)]
pub struct GroupScorer<'c> {
    config: &'c GroupingConfig,
    frame: Bounds,
}

impl<'c> GroupScorer<'c> {
    /// Use the bounding box of every node as the reference frame for bands.
    pub fn new(config: &'c GroupingConfig, nodes: &[DesignNode]) -> Self {
        let frame = Bounds::enclosing(nodes.iter().map(|n| &n.bounds)).unwrap_or_default();
        Self::with_frame(config, frame)
    }

    pub fn with_frame(config: &'c GroupingConfig, frame: Bounds) -> Self {
        Self { config, frame }
    }

    pub fn frame(&self) -> &Bounds {
        &self.frame
    }

    /// Nodes sharing a token (of minimum length) with the group name or description.
    pub fn keyword_matches<'a>(
        &self,
        group: &GroupSkeleton,
        pool: &[&'a DesignNode],
    ) -> Vec<&'a DesignNode> {
        let wanted: Vec<String> = tokens(&group.keyword_source())
            .into_iter()
            .filter(|t| t.chars().count() >= self.config.min_keyword_len)
            .collect();
        if wanted.is_empty() {
            return Vec::new();
        }
        pool.iter()
            .copied()
            .filter(|node| {
                let source = format!("{} {}", node.text_content.as_deref().unwrap_or_default(), node.name);
                tokens(&source).iter().any(|t| wanted.contains(t))
            })
            .collect()
    }

    /// The band implied by keywords in the group name, if any.
    pub fn band_for(&self, group: &GroupSkeleton) -> Option<Band> {
        let name = words(&group.name);
        let mentions = |keys: &[&str]| keys.iter().any(|k| has_keyword(&name, k));
        if mentions(TOP_WORDS) {
            Some(Band::Top)
        } else if mentions(BOTTOM_WORDS) {
            Some(Band::Bottom)
        } else if mentions(MIDDLE_WORDS) {
            Some(Band::Middle)
        } else if mentions(SECTION_WORDS) {
            group.bounds.map(|b| Band::Near(b.y))
        } else {
            None
        }
    }

    /// Nodes whose top edge falls in the band named by the group.
    pub fn position_matches<'a>(
        &self,
        group: &GroupSkeleton,
        pool: &[&'a DesignNode],
    ) -> Vec<&'a DesignNode> {
        let Some(band) = self.band_for(group) else {
            return Vec::new();
        };
        let third = self.frame.height / 3.0;
        let top_limit = self.frame.y + third;
        let middle_limit = self.frame.y + 2.0 * third;
        let tolerance = self.config.section_tolerance;

        pool.iter()
            .copied()
            .filter(|node| {
                let y = node.bounds.y;
                match band {
                    Band::Top => y < top_limit,
                    Band::Middle => y >= top_limit && y < middle_limit,
                    Band::Bottom => y >= middle_limit,
                    Band::Near(target) => (y - target).abs() <= tolerance,
                }
            })
            .collect()
    }

    /// Nodes whose category fits the group's category.
    pub fn category_matches<'a>(
        &self,
        group: &GroupSkeleton,
        pool: &[&'a DesignNode],
    ) -> Vec<&'a DesignNode> {
        let category = group.resolved_category();
        pool.iter().copied().filter(|node| self.fits_category(category, node)).collect()
    }

    fn fits_category(&self, category: GroupCategory, node: &DesignNode) -> bool {
        let wide = node.bounds.height > 0.0
            && node.bounds.width >= self.config.wide_aspect_ratio * node.bounds.height;
        match category {
            GroupCategory::Button => {
                node.category == NodeCategory::Instance
                    || (node.category == NodeCategory::Rectangle && wide)
            }
            GroupCategory::Text => node.category == NodeCategory::Text,
            GroupCategory::Input => {
                matches!(node.category, NodeCategory::Instance | NodeCategory::Frame)
                    || (node.category == NodeCategory::Rectangle && wide)
            }
            GroupCategory::Image => {
                matches!(node.category, NodeCategory::Ellipse | NodeCategory::Rectangle)
            }
            GroupCategory::Card
            | GroupCategory::Navigation
            | GroupCategory::List
            | GroupCategory::Container => matches!(
                node.category,
                NodeCategory::Frame | NodeCategory::Group | NodeCategory::Rectangle
            ),
            GroupCategory::Other => false,
        }
    }

    /// Nodes overlapping, or within the proximity radius of, the declared bounds.
    pub fn proximity_matches<'a>(
        &self,
        group: &GroupSkeleton,
        pool: &[&'a DesignNode],
    ) -> Vec<&'a DesignNode> {
        let Some(declared) = group.bounds.filter(|b| !b.is_empty()) else {
            return Vec::new();
        };
        pool.iter()
            .copied()
            .filter(|node| declared.gap_to(&node.bounds) <= self.config.proximity_radius)
            .collect()
    }

    /// Every node picked by at least one heuristic, best first.
    ///
    /// Score is the weighted count of heuristics plus a bonus for nodes above
    /// the size noise floor. Ties keep pool order.
    pub fn rank<'a>(&self, group: &GroupSkeleton, pool: &[&'a DesignNode]) -> Vec<ScoredNode<'a>> {
        let subsets = [
            (Heuristic::Keyword, self.config.keyword_weight, self.keyword_matches(group, pool)),
            (Heuristic::Position, self.config.position_weight, self.position_matches(group, pool)),
            (Heuristic::Category, self.config.category_weight, self.category_matches(group, pool)),
            (
                Heuristic::Proximity,
                self.config.proximity_weight,
                self.proximity_matches(group, pool),
            ),
        ];
        let picked: Vec<(Heuristic, f64, HashSet<&str>)> = subsets
            .iter()
            .map(|(h, w, nodes)| (*h, *w, nodes.iter().map(|n| n.id.as_str()).collect()))
            .collect();

        let mut ranked: Vec<ScoredNode<'a>> = pool
            .iter()
            .copied()
            .filter_map(|node| {
                let hits: Vec<(Heuristic, f64)> = picked
                    .iter()
                    .filter(|(_, _, ids)| ids.contains(node.id.as_str()))
                    .map(|(h, w, _)| (*h, *w))
                    .collect();
                if hits.is_empty() {
                    return None;
                }
                let bonus = if node.bounds.area() >= self.config.min_node_area {
                    self.config.size_bonus
                } else {
                    0.0
                };
                Some(ScoredNode {
                    node,
                    score: hits.iter().map(|(_, w)| w).sum::<f64>() + bonus,
                    heuristics: hits.into_iter().map(|(h, _)| h).collect(),
                })
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// `rank`, truncated to the member limit for the group's category.
    pub fn select<'a>(&self, group: &GroupSkeleton, pool: &[&'a DesignNode]) -> Vec<ScoredNode<'a>> {
        let mut ranked = self.rank(group, pool);
        ranked.truncate(self.config.member_limits.for_category(group.resolved_category()));
        ranked
    }
}

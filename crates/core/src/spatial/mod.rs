//! Stateless geometry primitives used by the grouping engine and by
//! diagnostics frontends.
//!
//! Every function is generic over `HasBounds` so the same primitives work on
//! design nodes, rendered elements, and completed groups. Outputs borrow the
//! input items and preserve input order wherever the contract allows it.

use std::collections::BTreeMap;

use crate::model::{Axis, Bounds, HasBounds};

/// Single-linkage clustering on the distance between top-left corners.
///
/// Two items share a cluster when a chain of items connects them with every
/// hop strictly closer than `max_distance`. Only clusters with at least two
/// members are returned, ordered by their first member; members keep input order.
///
/// `max_distance <= 0` yields no clusters; `f64::INFINITY` yields one cluster
/// containing every item (when there are at least two).
pub fn cluster_by_proximity<T: HasBounds>(items: &[T], max_distance: f64) -> Vec<Vec<&T>> {
    if items.len() < 2 || max_distance.is_nan() || max_distance <= 0.0 {
        return Vec::new();
    }

    let mut assigned: Vec<Option<usize>> = vec![None; items.len()];
    let mut clusters: Vec<Vec<usize>> = Vec::new();

    for seed in 0..items.len() {
        if assigned[seed].is_some() {
            continue;
        }
        let cluster_id = clusters.len();
        assigned[seed] = Some(cluster_id);
        let mut members = vec![seed];
        let mut frontier = vec![seed];

        while let Some(current) = frontier.pop() {
            let origin = items[current].bounds();
            for (candidate, slot) in assigned.iter_mut().enumerate() {
                if slot.is_none() && origin.corner_distance(items[candidate].bounds()) < max_distance
                {
                    *slot = Some(cluster_id);
                    members.push(candidate);
                    frontier.push(candidate);
                }
            }
        }

        members.sort_unstable();
        clusters.push(members);
    }

    clusters
        .into_iter()
        .filter(|members| members.len() >= 2)
        .map(|members| members.into_iter().map(|i| &items[i]).collect())
        .collect()
}

/// Items whose coordinate on one axis rounds to the same multiple of the tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentGroup<'a, T> {
    pub axis: Axis,
    /// Shared, rounded coordinate.
    pub coordinate: f64,
    /// Ordered along the orthogonal axis.
    pub members: Vec<&'a T>,
}

/// Bucket items by rounding the `axis` coordinate to the nearest multiple of
/// `tolerance`. Buckets with fewer than two members are dropped; the rest are
/// returned in ascending coordinate order.
///
/// A non-positive or non-finite tolerance buckets on whole pixels.
pub fn alignment_groups<T: HasBounds>(
    items: &[T],
    axis: Axis,
    tolerance: f64,
) -> Vec<AlignmentGroup<'_, T>> {
    let step = if tolerance.is_finite() && tolerance > 0.0 { tolerance } else { 1.0 };

    let mut buckets: BTreeMap<i64, Vec<&T>> = BTreeMap::new();
    for item in items {
        let key = (axis.coordinate(item.bounds()) / step).round() as i64;
        buckets.entry(key).or_default().push(item);
    }

    let orthogonal = axis.orthogonal();
    buckets
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(key, mut members)| {
            members.sort_by(|a, b| {
                orthogonal.coordinate(a.bounds()).total_cmp(&orthogonal.coordinate(b.bounds()))
            });
            AlignmentGroup { axis, coordinate: key as f64 * step, members }
        })
        .collect()
}

/// Split items into top-to-bottom sections.
///
/// Items are sorted by `y` (ties keep input order) and accumulated into a
/// running section; a new section starts whenever the next item's top is more
/// than `gap_threshold` below the lowest bottom edge seen in the current
/// section. Every item lands in exactly one section.
pub fn vertical_sections<T: HasBounds>(items: &[T], gap_threshold: f64) -> Vec<Vec<&T>> {
    let mut ordered: Vec<&T> = items.iter().collect();
    ordered.sort_by(|a, b| a.bounds().y.total_cmp(&b.bounds().y));

    let mut sections: Vec<Vec<&T>> = Vec::new();
    let mut current: Vec<&T> = Vec::new();
    let mut section_bottom = f64::NEG_INFINITY;

    for item in ordered {
        let bounds: &Bounds = item.bounds();
        if !current.is_empty() && bounds.y - section_bottom > gap_threshold {
            sections.push(std::mem::take(&mut current));
            section_bottom = f64::NEG_INFINITY;
        }
        section_bottom = section_bottom.max(bounds.bottom());
        current.push(item);
    }

    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

use anyhow::{anyhow, Result};
use bridge_core::model::{Axis, DesignNode};
use bridge_core::spatial::{alignment_groups, cluster_by_proximity, vertical_sections};
use serde::Serialize;

use crate::commands::print_json;
use crate::{canonicalize_or_current, read_input, resolve_input};

#[derive(Serialize)]
pub struct AlignmentInfo {
    pub axis: Axis,
    pub coordinate: f64,
    pub members: Vec<String>,
}

fn load_nodes(root: &str, nodes: &str) -> Result<Vec<DesignNode>> {
    let root_path = canonicalize_or_current(root)?;
    read_input(&resolve_input(&root_path, nodes))
}

fn ids(members: &[&DesignNode]) -> Vec<String> {
    members.iter().map(|n| n.id.clone()).collect()
}

/// Parse an axis name (`x` or `y`).
pub fn parse_axis(axis: &str) -> Result<Axis> {
    match axis.trim().to_lowercase().as_str() {
        "x" => Ok(Axis::X),
        "y" => Ok(Axis::Y),
        other => Err(anyhow!("Unknown axis '{other}'; expected 'x' or 'y'")),
    }
}

/// Print the top-to-bottom sections of a node list.
pub fn sections_command(root: &str, nodes: &str, gap: f64, json: bool) -> Result<()> {
    let design_nodes = load_nodes(root, nodes)?;
    let sections: Vec<Vec<String>> =
        vertical_sections(&design_nodes, gap).iter().map(|s| ids(s)).collect();

    if json {
        return print_json(&sections);
    }

    println!("Sections ({}, gap {gap}):", sections.len());
    for (index, members) in sections.iter().enumerate() {
        println!("  {}: {}", index + 1, members.join(", "));
    }
    Ok(())
}

/// Print proximity clusters of a node list.
pub fn clusters_command(root: &str, nodes: &str, max_distance: f64, json: bool) -> Result<()> {
    let design_nodes = load_nodes(root, nodes)?;
    let clusters: Vec<Vec<String>> =
        cluster_by_proximity(&design_nodes, max_distance).iter().map(|c| ids(c)).collect();

    if json {
        return print_json(&clusters);
    }

    println!("Clusters ({}, max distance {max_distance}):", clusters.len());
    if clusters.is_empty() {
        println!("  (none)");
    }
    for (index, members) in clusters.iter().enumerate() {
        println!("  {}: {}", index + 1, members.join(", "));
    }
    Ok(())
}

/// Print alignment groups of a node list along one axis.
pub fn align_command(root: &str, nodes: &str, axis: &str, tolerance: f64, json: bool) -> Result<()> {
    let axis = parse_axis(axis)?;
    let design_nodes = load_nodes(root, nodes)?;
    let groups: Vec<AlignmentInfo> = alignment_groups(&design_nodes, axis, tolerance)
        .into_iter()
        .map(|g| AlignmentInfo { axis: g.axis, coordinate: g.coordinate, members: ids(&g.members) })
        .collect();

    if json {
        return print_json(&groups);
    }

    println!("Alignment groups ({}, tolerance {tolerance}):", groups.len());
    if groups.is_empty() {
        println!("  (none)");
    }
    for group in &groups {
        println!("  {:?} = {}: {}", group.axis, group.coordinate, group.members.join(", "));
    }
    Ok(())
}

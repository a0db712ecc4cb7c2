use crate::model::{GroupCategory, LayoutSummary, SemanticGroup};
use crate::spatial::vertical_sections;

/// Reading-order summary of the groups that received members.
///
/// Groups are split into vertical sections, then ordered left to right within
/// each section. Returns `None` when no group has children.
pub fn summarize_layout(groups: &[SemanticGroup], section_gap: f64) -> Option<LayoutSummary> {
    let placed: Vec<&SemanticGroup> = groups.iter().filter(|g| !g.children.is_empty()).collect();
    if placed.is_empty() {
        return None;
    }

    let ordered: Vec<&SemanticGroup> = vertical_sections(&placed, section_gap)
        .into_iter()
        .flat_map(|mut section| {
            section.sort_by(|a, b| a.bounds.x.total_cmp(&b.bounds.x));
            section.into_iter().copied()
        })
        .collect();

    let ordered_section_names: Vec<String> = ordered.iter().map(|g| g.name.clone()).collect();
    let has = |category: GroupCategory| ordered.iter().any(|g| g.category == category);
    let screen_category = if has(GroupCategory::Input) {
        "form"
    } else if has(GroupCategory::List) {
        "list"
    } else if ordered.first().map(|g| g.category) == Some(GroupCategory::Navigation) {
        "navigation"
    } else {
        "content"
    };

    Some(LayoutSummary {
        screen_category: screen_category.to_string(),
        flow_description: ordered_section_names.join(" → "),
        ordered_section_names,
    })
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::geometry::{Bounds, HasBounds};
use super::nodes::NodeCategory;
use crate::text::{has_keyword, words};

/// Semantic role of a group of design nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupCategory {
    Button,
    Text,
    Card,
    Navigation,
    Input,
    List,
    Image,
    Container,
    #[default]
    #[serde(other)]
    Other,
}

/// Name keywords that imply a group category, checked in order.
const NAME_HINTS: &[(&[&str], GroupCategory)] = &[
    (&["button", "btn", "cta"], GroupCategory::Button),
    (
        &["nav", "navbar", "navigation", "menu", "tab bar", "tabbar", "toolbar"],
        GroupCategory::Navigation,
    ),
    (&["input", "field", "search", "form"], GroupCategory::Input),
    (&["list", "feed", "items"], GroupCategory::List),
    (&["image", "icon", "avatar", "photo", "logo"], GroupCategory::Image),
    (&["card", "tile"], GroupCategory::Card),
    (&["text", "title", "label", "heading", "caption"], GroupCategory::Text),
    (
        &["section", "header", "footer", "content", "container", "body", "main", "action"],
        GroupCategory::Container,
    ),
];

impl GroupCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupCategory::Button => "button",
            GroupCategory::Text => "text",
            GroupCategory::Card => "card",
            GroupCategory::Navigation => "navigation",
            GroupCategory::Input => "input",
            GroupCategory::List => "list",
            GroupCategory::Image => "image",
            GroupCategory::Container => "container",
            GroupCategory::Other => "other",
        }
    }

    /// Guess a category from a free-text group name.
    pub fn infer_from_name(name: &str) -> Self {
        let name = words(name);
        NAME_HINTS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| has_keyword(&name, k)))
            .map(|(_, category)| *category)
            .unwrap_or(GroupCategory::Other)
    }

    /// Direct mapping used when no external classification exists.
    pub fn from_node_category(category: NodeCategory) -> Self {
        match category {
            NodeCategory::Text => GroupCategory::Text,
            NodeCategory::Ellipse => GroupCategory::Image,
            NodeCategory::Rectangle | NodeCategory::Frame | NodeCategory::Group => {
                GroupCategory::Container
            }
            NodeCategory::Component | NodeCategory::Instance | NodeCategory::Other => {
                GroupCategory::Other
            }
        }
    }

    /// Container-like categories hold other elements rather than being one.
    pub fn is_container_like(&self) -> bool {
        matches!(
            self,
            GroupCategory::Card
                | GroupCategory::Navigation
                | GroupCategory::List
                | GroupCategory::Container
        )
    }
}

/// A group proposed by an external classifier. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupSkeleton {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<GroupCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    pub children: Vec<String>,
    pub properties: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl GroupSkeleton {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_category(mut self, category: GroupCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Declared category, or one inferred from the name.
    pub fn resolved_category(&self) -> GroupCategory {
        self.category.unwrap_or_else(|| GroupCategory::infer_from_name(&self.name))
    }

    /// Name and description joined, used for keyword matching.
    pub fn keyword_source(&self) -> String {
        match &self.description {
            Some(desc) => format!("{} {}", self.name, desc),
            None => self.name.clone(),
        }
    }
}

/// A completed group of design nodes forming one logical UI section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticGroup {
    pub id: String,
    pub name: String,
    pub category: GroupCategory,
    pub bounds: Bounds,
    /// Member node ids.
    pub children: Vec<String>,
    pub properties: BTreeMap<String, serde_json::Value>,
    /// In `[0.1, 1.0]`.
    pub confidence: f64,
}

impl HasBounds for SemanticGroup {
    fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

/// Reading-order overview of a grouped screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    pub screen_category: String,
    pub ordered_section_names: Vec<String>,
    pub flow_description: String,
}

/// Output of one grouping run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingResult {
    pub groups: Vec<SemanticGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_summary: Option<LayoutSummary>,
    /// Ids of nodes referenced by no group, in input order.
    pub ungrouped_nodes: Vec<String>,
    pub overall_confidence: f64,
    /// Wall-clock time spent grouping, in milliseconds.
    pub elapsed_time_ms: f64,
}

impl GroupingResult {
    pub fn group(&self, id: &str) -> Option<&SemanticGroup> {
        self.groups.iter().find(|g| g.id == id)
    }
}

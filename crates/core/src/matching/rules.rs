//! Category rules: which node categories a component name suggests.
//!
//! Every rule whose predicate holds is a candidate; the highest score wins and
//! ties go to the earlier rule. Rules with no keywords apply to any name.

use crate::model::NodeCategory;
use crate::text::{has_keyword, words};

use crate::model::NodeCategory::*;

/// One row of the category table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryRule {
    /// Stable name recorded in candidate reasons.
    pub name: &'static str,
    /// Whole words (or word runs) of the component name; empty matches every name.
    pub keywords: &'static [&'static str],
    pub categories: &'static [NodeCategory],
    pub score: f64,
}

impl CategoryRule {
    pub fn applies(&self, component_name: &str, category: NodeCategory) -> bool {
        if !self.categories.contains(&category) {
            return false;
        }
        if self.keywords.is_empty() {
            return true;
        }
        let name = words(component_name);
        self.keywords.iter().any(|k| has_keyword(&name, k))
    }
}

const BUTTON: &[&str] = &["button", "btn", "cta"];
const TEXTUAL: &[&str] = &["text", "label", "title", "heading", "caption", "paragraph"];
const CARD: &[&str] = &["card", "tile", "panel"];
const INPUT: &[&str] = &["input", "field", "search", "textbox"];
const IMAGE: &[&str] = &["image", "icon", "avatar", "logo", "photo"];
const NAVIGATION: &[&str] =
    &["nav", "navbar", "navigation", "menu", "tab", "tabbar", "header", "footer", "toolbar"];
const LIST: &[&str] = &["list", "item", "row"];

const ALL_CATEGORIES: &[NodeCategory] =
    &[Text, Rectangle, Ellipse, Frame, Group, Component, Instance, Other];

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        name: "button-instance",
        keywords: BUTTON,
        categories: &[Instance, Component],
        score: 30.0,
    },
    CategoryRule {
        name: "button-shape",
        keywords: BUTTON,
        categories: &[Rectangle, Frame],
        score: 20.0,
    },
    CategoryRule {
        name: "text-node",
        keywords: TEXTUAL,
        categories: &[Text],
        score: 28.0,
    },
    CategoryRule {
        name: "input-field",
        keywords: INPUT,
        categories: &[Instance, Frame, Rectangle],
        score: 22.0,
    },
    CategoryRule {
        name: "card-frame",
        keywords: CARD,
        categories: &[Frame, Group],
        score: 20.0,
    },
    CategoryRule {
        name: "card-instance",
        keywords: CARD,
        categories: &[Instance, Component],
        score: 18.0,
    },
    CategoryRule {
        name: "image-instance",
        keywords: IMAGE,
        categories: &[Instance, Component],
        score: 20.0,
    },
    CategoryRule {
        name: "image-shape",
        keywords: IMAGE,
        categories: &[Rectangle, Ellipse],
        score: 12.0,
    },
    CategoryRule {
        name: "navigation",
        keywords: NAVIGATION,
        categories: &[Frame, Instance, Group],
        score: 20.0,
    },
    CategoryRule {
        name: "list-container",
        keywords: LIST,
        categories: &[Frame, Group],
        score: 16.0,
    },
    CategoryRule {
        name: "generic-container",
        keywords: &[],
        categories: &[Frame, Instance, Component, Group],
        score: 8.0,
    },
    CategoryRule {
        name: "minimal",
        keywords: &[],
        categories: ALL_CATEGORIES,
        score: 4.0,
    },
];

/// Highest-scoring rule for this pair. The `minimal` row guarantees a match.
pub fn best_category_rule(component_name: &str, category: NodeCategory) -> &'static CategoryRule {
    CATEGORY_RULES
        .iter()
        .filter(|rule| rule.applies(component_name, category))
        .fold(None::<&CategoryRule>, |best, rule| match best {
            Some(current) if current.score >= rule.score => Some(current),
            _ => Some(rule),
        })
        .unwrap_or(&CATEGORY_RULES[CATEGORY_RULES.len() - 1])
}

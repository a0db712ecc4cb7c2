use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::geometry::{Bounds, HasBounds};

/// Node type as reported by the design tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeCategory {
    Text,
    Rectangle,
    Ellipse,
    Frame,
    Group,
    Component,
    Instance,
    #[default]
    #[serde(other)]
    Other,
}

impl NodeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Text => "TEXT",
            NodeCategory::Rectangle => "RECTANGLE",
            NodeCategory::Ellipse => "ELLIPSE",
            NodeCategory::Frame => "FRAME",
            NodeCategory::Group => "GROUP",
            NodeCategory::Component => "COMPONENT",
            NodeCategory::Instance => "INSTANCE",
            NodeCategory::Other => "OTHER",
        }
    }
}

/// Boolean style indicators. Declared on design nodes, observed on rendered elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualAttributes {
    pub has_corner_radius: bool,
    pub has_fill: bool,
    pub has_stroke: bool,
    pub has_shadow: bool,
}

impl VisualAttributes {
    /// Number of indicators present on both sides.
    pub fn shared_count(&self, other: &VisualAttributes) -> usize {
        [
            self.has_corner_radius && other.has_corner_radius,
            self.has_fill && other.has_fill,
            self.has_stroke && other.has_stroke,
            self.has_shadow && other.has_shadow,
        ]
        .into_iter()
        .filter(|shared| *shared)
        .count()
    }
}

/// One node of the flattened design document tree. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignNode {
    pub id: String,
    pub name: String,
    pub category: NodeCategory,
    pub bounds: Bounds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    pub visual_attributes: VisualAttributes,
}

impl DesignNode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: NodeCategory,
        bounds: Bounds,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            bounds,
            text_content: None,
            visual_attributes: VisualAttributes::default(),
        }
    }

    /// Builder-style helper to attach text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    pub fn with_visual(mut self, visual: VisualAttributes) -> Self {
        self.visual_attributes = visual;
        self
    }

    /// Non-empty labels usable for text comparison: text content first, then the name.
    pub fn labels(&self) -> Vec<&str> {
        [self.text_content.as_deref().unwrap_or_default(), self.name.as_str()]
            .into_iter()
            .filter(|label| !label.trim().is_empty())
            .collect()
    }
}

impl HasBounds for DesignNode {
    fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

/// Computed style of a rendered element, captured once per matching run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleSnapshot {
    pub corner_radius: f64,
    /// Background alpha in `[0, 1]`; zero means transparent.
    pub background_opacity: f64,
    pub shadow: bool,
    pub border_width: f64,
}

impl StyleSnapshot {
    /// Reduce the observed style to the same indicators design nodes declare.
    pub fn indicators(&self) -> VisualAttributes {
        VisualAttributes {
            has_corner_radius: self.corner_radius > 0.0,
            has_fill: self.background_opacity > 0.0,
            has_stroke: self.border_width > 0.0,
            has_shadow: self.shadow,
        }
    }
}

/// Read-only access to a live rendered element.
///
/// Implementations typically wrap a view or DOM handle owned by the caller.
pub trait ElementHandle: Send + Sync {
    fn computed_style(&self) -> StyleSnapshot;
    fn text_content(&self) -> Option<String>;
}

/// A measured on-screen rectangle from the generated rendering.
///
/// Style and text can be supplied up front (e.g. from a JSON measurement dump) or
/// through a live `handle`; the handle wins when both are present.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderedBounds {
    pub name: String,
    pub bounds: Bounds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleSnapshot>,
    #[serde(skip)]
    pub handle: Option<Arc<dyn ElementHandle>>,
}

impl RenderedBounds {
    pub fn new(name: impl Into<String>, bounds: Bounds) -> Self {
        Self { name: name.into(), bounds, ..Self::default() }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_style(mut self, style: StyleSnapshot) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_handle(mut self, handle: Arc<dyn ElementHandle>) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Query the live handle (if any) exactly once and freeze the result.
    pub fn snapshot(&self) -> ComponentSnapshot {
        let (style, text) = match &self.handle {
            Some(handle) => {
                (handle.computed_style(), handle.text_content().or_else(|| self.text.clone()))
            }
            None => (self.style.unwrap_or_default(), self.text.clone()),
        };
        ComponentSnapshot {
            name: self.name.clone(),
            bounds: self.bounds,
            text: text.unwrap_or_default(),
            style,
        }
    }
}

impl fmt::Debug for RenderedBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedBounds")
            .field("name", &self.name)
            .field("bounds", &self.bounds)
            .field("text", &self.text)
            .field("style", &self.style)
            .field("handle", &self.handle.as_ref().map(|_| "<live>"))
            .finish()
    }
}

impl HasBounds for RenderedBounds {
    fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

/// Frozen view of a `RenderedBounds` that the scorer works against.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSnapshot {
    pub name: String,
    pub bounds: Bounds,
    pub text: String,
    pub style: StyleSnapshot,
}

impl ComponentSnapshot {
    /// Non-empty labels usable for text comparison: observed text first, then the name.
    pub fn labels(&self) -> Vec<&str> {
        [self.text.as_str(), self.name.as_str()]
            .into_iter()
            .filter(|label| !label.trim().is_empty())
            .collect()
    }
}


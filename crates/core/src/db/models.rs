use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A human decision: rendered elements labelled `component` correspond to `node_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmationRecord {
    pub component: String,
    pub node_id: String,
    pub confirmed_at: String,
}

impl ConfirmationRecord {
    pub fn new(
        component: impl Into<String>,
        node_id: impl Into<String>,
        confirmed_at: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            node_id: node_id.into(),
            confirmed_at: confirmed_at.into(),
        }
    }
}

/// Which engine produced a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    Matching,
    Grouping,
}

impl RunKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunKind::Matching => "matching",
            RunKind::Grouping => "grouping",
        }
    }
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "matching" => Ok(RunKind::Matching),
            "grouping" => Ok(RunKind::Grouping),
            other => Err(format!("Invalid run kind '{other}'")),
        }
    }
}

/// Bookkeeping for one matching or grouping run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunRecord {
    pub kind: RunKind,
    /// Match policy for matching runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    /// SHA-256 of the design node input.
    pub nodes_digest: String,
    /// SHA-256 of the rendered bounds (matching) or proposed groups (grouping).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_digest: Option<String>,
    pub overall_confidence: f64,
    /// Matched components or non-empty groups.
    pub resolved: i64,
    /// Unmatched components or ungrouped nodes.
    pub unresolved: i64,
    pub started_at: String,
    pub finished_at: String,
}

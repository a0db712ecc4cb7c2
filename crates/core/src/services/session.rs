use chrono::Utc;
use log::debug;

use crate::config::EngineConfig;
use crate::db::{ConfirmationRecord, DbResult, RunKind, RunRecord, WorkspaceDb};
use crate::grouping::SemanticGrouper;
use crate::matching::BoundsMatcher;
use crate::model::{
    DesignNode, GroupSkeleton, GroupingResult, MatchPolicy, MatchingResult, RenderedBounds,
};

/// Content digests of the inputs a run was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputDigests {
    pub nodes: String,
    /// Rendered bounds for matching, proposed groups for grouping.
    pub secondary: Option<String>,
}

/// Coordinator that runs the engines with a workspace's configuration,
/// re-applies stored confirmations, and records each run.
pub struct WorkspaceSession<'a> {
    pub config: &'a EngineConfig,
    pub db: &'a WorkspaceDb,
}

impl<'a> WorkspaceSession<'a> {
    pub fn new(config: &'a EngineConfig, db: &'a WorkspaceDb) -> Self {
        Self { config, db }
    }

    /// Match, then restore confirmations whose node is still a candidate.
    pub fn run_matching(
        &self,
        components: &[RenderedBounds],
        nodes: &[DesignNode],
        policy: MatchPolicy,
        digests: &InputDigests,
    ) -> DbResult<MatchingResult> {
        let started_at = Utc::now().to_rfc3339();
        let matcher = BoundsMatcher::new(self.config.matching.clone());
        let mut result = matcher.match_components(components, nodes, policy);

        for confirmation in self.db.list_confirmations()? {
            let applied = result.confirm_by_name(&confirmation.component, &confirmation.node_id);
            if applied == 0 {
                debug!(
                    "stored confirmation {} -> {} not applicable to this run",
                    confirmation.component, confirmation.node_id
                );
            }
        }

        let record = RunRecord {
            kind: RunKind::Matching,
            policy: Some(policy.as_str().to_string()),
            nodes_digest: digests.nodes.clone(),
            secondary_digest: digests.secondary.clone(),
            overall_confidence: result.overall_confidence,
            resolved: result.matches.len() as i64,
            unresolved: result.unmatched_components.len() as i64,
            started_at,
            finished_at: Utc::now().to_rfc3339(),
        };
        self.db.insert_run(&record)?;
        Ok(result)
    }

    /// Group and record the run.
    pub fn run_grouping(
        &self,
        nodes: &[DesignNode],
        proposed: Option<&[GroupSkeleton]>,
        digests: &InputDigests,
    ) -> DbResult<GroupingResult> {
        let started_at = Utc::now().to_rfc3339();
        let grouper = SemanticGrouper::new(self.config.grouping.clone());
        let result = grouper.group(nodes, proposed);

        let record = RunRecord {
            kind: RunKind::Grouping,
            policy: None,
            nodes_digest: digests.nodes.clone(),
            secondary_digest: digests.secondary.clone(),
            overall_confidence: result.overall_confidence,
            resolved: result.groups.iter().filter(|g| !g.children.is_empty()).count() as i64,
            unresolved: result.ungrouped_nodes.len() as i64,
            started_at,
            finished_at: Utc::now().to_rfc3339(),
        };
        self.db.insert_run(&record)?;
        Ok(result)
    }

    /// Persist a human confirmation for a component label.
    pub fn confirm(&self, component: &str, node_id: &str) -> DbResult<ConfirmationRecord> {
        let record = ConfirmationRecord::new(component, node_id, Utc::now().to_rfc3339());
        self.db.upsert_confirmation(&record)?;
        Ok(record)
    }
}

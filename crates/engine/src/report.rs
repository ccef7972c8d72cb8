// ABOUTME: The output document handed to renderers.
// ABOUTME: Key names and nesting are a stable contract; renaming one is a breaking change.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::artifacts::{AuditChecklist, BeforeAfterExample, QuickWin};
use crate::finding::Finding;
use crate::modules::ModuleResult;
use crate::timestamps::TimestampAudit;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub channel_health_score: u8,
    pub shorts_health_score: u8,
    /// Keyed by `AnalysisModule::key`.
    pub analysis_modules: BTreeMap<&'static str, ModuleResult>,
    /// Channel-scope findings, High first.
    pub all_recommendations: Vec<Finding>,
    pub shorts_recommendations: Vec<Finding>,
    pub timestamp_audit: TimestampAudit,
    pub quick_wins: Vec<QuickWin>,
    pub before_after_examples: Vec<BeforeAfterExample>,
    pub audit_checklist: AuditChecklist,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_recommendations: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
    pub quick_wins: usize,
    pub before_after_examples: usize,
    pub audit_issues: usize,
    pub shorts_videos: usize,
    pub long_form_videos: usize,
    pub shorts_high_priority: usize,
    pub shorts_medium_priority: usize,
    pub shorts_low_priority: usize,
    pub timestamp_eligible_videos: usize,
    pub timestamp_missing_videos: usize,
    pub timestamp_coverage_percent: f64,
}

impl AnalysisReport {
    /// Serialises the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

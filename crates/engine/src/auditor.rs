// ABOUTME: The Auditor runs every analysis module and assembles the report.
// ABOUTME: One call is one synchronous pass over an in-memory catalog with no I/O.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::artifacts::{audit_checklist, before_after_examples, quick_wins};
use crate::clock::Clock;
use crate::derive::derive_items;
use crate::error::AuditError;
use crate::finding::{sort_by_priority, Finding};
use crate::models::InputDocument;
use crate::modules::{default_modules, AnalysisModule, AuditContext, ScoreScope};
use crate::options::{AuditOptions, AuditorBuilder};
use crate::parser::parse_input_bytes;
use crate::report::{AnalysisReport, ReportSummary};
use crate::score::{channel_score, shorts_score, PriorityCounts};
use crate::timestamps::audit_timestamps;

/// Channel auditor. Holds configuration and the module set.
pub struct Auditor {
    opts: AuditOptions,
    modules: Vec<Box<dyn AnalysisModule>>,
}

impl fmt::Debug for Auditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.modules.iter().map(|m| m.key()).collect();
        f.debug_struct("Auditor")
            .field("opts", &self.opts)
            .field("modules", &keys)
            .finish()
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new(AuditOptions::default())
    }
}

impl Auditor {
    /// Create a new AuditorBuilder for configuring the auditor.
    pub fn builder() -> AuditorBuilder {
        AuditorBuilder::new()
    }

    /// Create a new Auditor with the given options and the built-in modules.
    pub fn new(opts: AuditOptions) -> Self {
        Self {
            opts,
            modules: default_modules(),
        }
    }

    /// Adds a module after the built-in ones. Its findings count towards
    /// the score named by its `scope()`.
    pub fn with_module(mut self, module: impl AnalysisModule + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn options(&self) -> &AuditOptions {
        &self.opts
    }

    /// Decodes `data` and analyses it.
    pub fn analyze_bytes(&self, data: &[u8]) -> Result<AnalysisReport, AuditError> {
        let doc = parse_input_bytes(data)?;
        Ok(self.analyze(&doc))
    }

    /// Analyses a decoded document using the configured clock.
    pub fn analyze(&self, doc: &InputDocument) -> AnalysisReport {
        self.analyze_at(doc, self.opts.clock.now())
    }

    fn analyze_at(&self, doc: &InputDocument, now: DateTime<Utc>) -> AnalysisReport {
        let derived = derive_items(&doc.videos);
        let ctx = AuditContext::new(&doc.channel, &derived, now)
            .with_video_url_base(&self.opts.video_url_base);

        let mut analysis_modules = std::collections::BTreeMap::new();
        let mut all_recommendations: Vec<Finding> = Vec::new();
        let mut shorts_recommendations: Vec<Finding> = Vec::new();
        for module in &self.modules {
            let result = module.analyze(&ctx);
            tracing::debug!(
                module = result.key,
                findings = result.recommendations.len(),
                "module finished"
            );
            match module.scope() {
                ScoreScope::Channel => all_recommendations.extend(result.recommendations.iter().cloned()),
                ScoreScope::Shorts => shorts_recommendations.extend(result.recommendations.iter().cloned()),
            }
            if analysis_modules.insert(module.key(), result).is_some() {
                tracing::warn!(module = module.key(), "duplicate module key replaced an earlier result");
            }
        }
        sort_by_priority(&mut all_recommendations);

        let channel_counts = PriorityCounts::tally(&all_recommendations);
        let shorts_counts = PriorityCounts::tally(&shorts_recommendations);

        let timestamp_audit = audit_timestamps(&ctx.long_form, &self.opts.video_url_base);
        let quick_wins = quick_wins(&ctx, self.opts.quick_win_limit);
        let before_after_examples = before_after_examples(&ctx);
        let audit_checklist = audit_checklist(&ctx, self.opts.minutes_per_fix);

        let summary = ReportSummary {
            total_recommendations: all_recommendations.len(),
            high_priority: channel_counts.high,
            medium_priority: channel_counts.medium,
            low_priority: channel_counts.low,
            quick_wins: quick_wins.len(),
            before_after_examples: before_after_examples.len(),
            audit_issues: audit_checklist.summary.total_issues,
            shorts_videos: ctx.shorts.len(),
            long_form_videos: ctx.long_form.len(),
            shorts_high_priority: shorts_counts.high,
            shorts_medium_priority: shorts_counts.medium,
            shorts_low_priority: shorts_counts.low,
            timestamp_eligible_videos: timestamp_audit.eligible_count,
            timestamp_missing_videos: timestamp_audit.missing_count,
            timestamp_coverage_percent: timestamp_audit.coverage_percent,
        };

        let report = AnalysisReport {
            channel_health_score: channel_score(channel_counts),
            shorts_health_score: shorts_score(shorts_counts),
            analysis_modules,
            all_recommendations,
            shorts_recommendations,
            timestamp_audit,
            quick_wins,
            before_after_examples,
            audit_checklist,
            summary,
        };

        tracing::info!(
            channel = %doc.channel.title,
            items = derived.len(),
            shorts = report.summary.shorts_videos,
            channel_score = report.channel_health_score,
            shorts_score = report.shorts_health_score,
            recommendations = report.summary.total_recommendations,
            "audit complete"
        );
        report
    }
}

/// Analyses `doc` with default options, reading "now" from `clock`.
pub fn analyze(doc: &InputDocument, clock: &dyn Clock) -> AnalysisReport {
    Auditor::default().analyze_at(doc, clock.now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::finding::Priority;
    use crate::modules::{ModuleMetrics, ModuleResult};
    use crate::modules::testing::item;
    use chrono::TimeZone;

    #[derive(Debug)]
    struct AlwaysHigh;

    impl AnalysisModule for AlwaysHigh {
        fn key(&self) -> &'static str {
            "alwaysHigh"
        }

        fn scope(&self) -> ScoreScope {
            ScoreScope::Shorts
        }

        fn analyze(&self, ctx: &AuditContext<'_>) -> ModuleResult {
            let mut result = crate::modules::ShortsModule.analyze(ctx);
            result.key = self.key();
            result.recommendations = vec![Finding::new(Priority::High, "Extra", "flagged", "", "")];
            result
        }
    }

    /// Reuses the Shorts analysis but keeps the default channel scope.
    #[derive(Debug)]
    struct ChannelFlag;

    impl AnalysisModule for ChannelFlag {
        fn key(&self) -> &'static str {
            "channelFlag"
        }

        fn analyze(&self, ctx: &AuditContext<'_>) -> ModuleResult {
            let mut result = crate::modules::ShortsModule.analyze(ctx);
            result.key = self.key();
            result.recommendations = vec![Finding::new(Priority::High, "Extra", "flagged", "", "")];
            result
        }
    }

    fn doc() -> InputDocument {
        let mut doc = InputDocument::default();
        doc.channel.title = "Test Channel".to_string();
        doc.videos = vec![item("a", "A reasonably descriptive long-form title", "PT6M", 100, 5, 1)];
        doc
    }

    #[test]
    fn extra_module_counts_towards_its_scope() {
        let now = Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap();
        let base = Auditor::builder().clock(FixedClock::new(now)).build();
        let extended = Auditor::builder()
            .clock(FixedClock::new(now))
            .build()
            .with_module(AlwaysHigh);

        let before = base.analyze(&doc());
        let after = extended.analyze(&doc());
        assert_eq!(after.channel_health_score, before.channel_health_score);
        assert_eq!(after.shorts_health_score, before.shorts_health_score - 12);
        assert!(after.analysis_modules.contains_key("alwaysHigh"));
        assert!(matches!(
            after.analysis_modules["alwaysHigh"].metrics,
            ModuleMetrics::Shorts(_)
        ));
    }

    #[test]
    fn routing_follows_the_module_scope() {
        let now = Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap();
        let base = Auditor::builder().clock(FixedClock::new(now)).build();
        let extended = Auditor::builder()
            .clock(FixedClock::new(now))
            .build()
            .with_module(ChannelFlag);

        let before = base.analyze(&doc());
        let after = extended.analyze(&doc());
        assert_eq!(after.shorts_health_score, before.shorts_health_score);
        assert_eq!(after.channel_health_score, before.channel_health_score.saturating_sub(10).max(10));
        assert!(after.all_recommendations.iter().any(|f| f.issue == "flagged"));
        assert!(!after.shorts_recommendations.iter().any(|f| f.issue == "flagged"));
    }

    #[test]
    fn convenience_entry_point_matches_auditor() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap());
        let direct = analyze(&doc(), &clock);
        let built = Auditor::builder().clock(clock).build().analyze(&doc());
        assert_eq!(direct, built);
    }

    #[test]
    fn bytes_entry_point_reports_invalid_input() {
        let err = Auditor::default().analyze_bytes(br#"{"videos": []}"#).unwrap_err();
        assert!(matches!(err, AuditError::Invalid(_)));
    }
}

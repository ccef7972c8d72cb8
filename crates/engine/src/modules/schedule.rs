// ABOUTME: Publishing schedule analysis module.
// ABOUTME: Upload gaps, consistency score, weekly frequency, recency and best days of week.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AnalysisModule, AuditContext, ModuleMetrics, ModuleResult};
use crate::finding::{evaluate, Finding, FindingRule, Priority};
use crate::stats::{mean, round_to, std_dev};
use crate::text::group_thousands;

const MIN_CONSISTENCY: f64 = 5.0;
const MIN_UPLOADS_PER_WEEK: f64 = 1.0;
const MAX_UPLOADS_PER_WEEK: f64 = 5.0;
const MAX_DAYS_SILENT: i64 = 30;
const BEST_DAYS: usize = 3;

/// Gap statistics over a set of publish dates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cadence {
    pub average_gap_days: f64,
    pub gap_std_days: f64,
    /// `max(0, 10 - std/avg * 10)`, 0 when the average gap is 0.
    pub consistency_score: f64,
    pub uploads_per_week: f64,
    pub days_since_last: Option<i64>,
    pub longest_gap_days: Option<i64>,
    pub span_days: i64,
}

/// Computes cadence statistics. `dates` need not be sorted.
pub fn cadence(dates: &[DateTime<Utc>], now: DateTime<Utc>) -> Cadence {
    let mut sorted = dates.to_vec();
    sorted.sort();

    let gaps: Vec<i64> = sorted.windows(2).map(|w| (w[1] - w[0]).num_days()).collect();
    let gaps_f: Vec<f64> = gaps.iter().map(|&g| g as f64).collect();
    let average_gap_days = mean(&gaps_f);
    let gap_std_days = std_dev(&gaps_f);
    let consistency_score = if average_gap_days > 0.0 {
        (10.0 - gap_std_days / average_gap_days * 10.0).max(0.0)
    } else {
        0.0
    };

    let span_days = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (*last - *first).num_days(),
        _ => 0,
    };
    let uploads_per_week = if sorted.len() > 1 && span_days > 0 {
        sorted.len() as f64 / (span_days as f64 / 7.0)
    } else {
        0.0
    };

    Cadence {
        average_gap_days,
        gap_std_days,
        consistency_score,
        uploads_per_week,
        days_since_last: sorted.last().map(|last| (now - *last).num_days()),
        longest_gap_days: gaps.iter().copied().max(),
        span_days,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayTally {
    pub views: u64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMetrics {
    pub average_gap_days: f64,
    pub consistency_score: f64,
    pub uploads_per_week: f64,
    pub days_since_last_upload: Option<i64>,
    pub best_performing_days: Vec<(String, f64)>,
    pub upload_distribution: BTreeMap<String, DayTally>,
    pub unparsed_dates: usize,
    #[serde(skip)]
    raw: Cadence,
    #[serde(skip)]
    dated_items: usize,
}

const RULES: &[FindingRule<ScheduleMetrics>] = &[
    FindingRule {
        name: "inconsistent_schedule",
        when: |m| m.dated_items > 0 && m.raw.consistency_score < MIN_CONSISTENCY,
        build: |m| {
            Finding::new(
                Priority::High,
                "Schedule",
                format!(
                    "Inconsistent upload schedule (score: {:.1}/10)",
                    m.raw.consistency_score
                ),
                format!(
                    "Establish consistent upload frequency. Current avg: every {} days with high variation.",
                    m.raw.average_gap_days as i64
                ),
                "Consistency helps build audience habits and improves algorithm favorability",
            )
        },
    },
    FindingRule {
        name: "low_frequency",
        when: |m| m.dated_items > 0 && m.raw.uploads_per_week < MIN_UPLOADS_PER_WEEK,
        build: |m| {
            Finding::new(
                Priority::High,
                "Schedule",
                format!(
                    "Low upload frequency: {:.1} videos per week",
                    m.raw.uploads_per_week
                ),
                "Increase to at least 1 video per week for sustained growth",
                "Regular content is essential for channel growth and audience retention",
            )
        },
    },
    FindingRule {
        name: "high_frequency",
        when: |m| m.raw.uploads_per_week > MAX_UPLOADS_PER_WEEK,
        build: |m| {
            Finding::new(
                Priority::Medium,
                "Schedule",
                format!(
                    "High upload frequency: {:.1} videos per week",
                    m.raw.uploads_per_week
                ),
                "Consider if quality is maintained at this pace. Sometimes less frequent, higher quality wins.",
                "Balance quantity with quality; burnout risk is high",
            )
        },
    },
    FindingRule {
        name: "stale_channel",
        when: |m| m.raw.days_since_last.is_some_and(|d| d > MAX_DAYS_SILENT),
        build: |m| {
            Finding::new(
                Priority::High,
                "Schedule",
                format!(
                    "{} days since last upload",
                    m.raw.days_since_last.unwrap_or_default()
                ),
                "Upload new content soon. Long gaps hurt algorithm performance and audience retention.",
                "Critical: Extended silence can significantly damage channel momentum",
            )
        },
    },
    FindingRule {
        name: "best_day",
        when: |m| !m.best_performing_days.is_empty(),
        build: |m| {
            let (day, views) = &m.best_performing_days[0];
            Finding::new(
                Priority::Medium,
                "Schedule",
                format!(
                    "Best performing day: {} (avg {} views)",
                    day,
                    group_thousands(*views as u64)
                ),
                format!("Consider uploading more content on {} when possible", day),
                "Align uploads with proven high-performance days",
            )
        },
    },
];

/// Publishing cadence across the whole catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleModule;

impl ScheduleModule {
    pub fn metrics(ctx: &AuditContext<'_>) -> ScheduleMetrics {
        let mut dated: Vec<(DateTime<Utc>, u64)> = ctx
            .items
            .iter()
            .filter_map(|d| d.published.map(|p| (p, d.views())))
            .collect();
        dated.sort_by_key(|(p, _)| *p);

        let dates: Vec<DateTime<Utc>> = dated.iter().map(|(p, _)| *p).collect();
        let raw = cadence(&dates, ctx.now);

        // first-seen day order decides ties between equal averages
        let mut days: Vec<(String, DayTally)> = Vec::new();
        for (published, views) in &dated {
            let name = published.format("%A").to_string();
            match days.iter_mut().find(|(d, _)| *d == name) {
                Some((_, tally)) => {
                    tally.views += views;
                    tally.count += 1;
                }
                None => days.push((name, DayTally { views: *views, count: 1 })),
            }
        }
        let mut best: Vec<(String, f64)> = days
            .iter()
            .map(|(day, t)| (day.clone(), t.views as f64 / t.count as f64))
            .collect();
        best.sort_by(|a, b| b.1.total_cmp(&a.1));
        best.truncate(BEST_DAYS);

        ScheduleMetrics {
            average_gap_days: round_to(raw.average_gap_days, 1),
            consistency_score: round_to(raw.consistency_score, 1),
            uploads_per_week: round_to(raw.uploads_per_week, 2),
            days_since_last_upload: raw.days_since_last,
            best_performing_days: best,
            upload_distribution: days.into_iter().collect(),
            unparsed_dates: ctx.items.len() - dated.len(),
            raw,
            dated_items: dated.len(),
        }
    }
}

impl AnalysisModule for ScheduleModule {
    fn key(&self) -> &'static str {
        "uploadSchedule"
    }

    fn analyze(&self, ctx: &AuditContext<'_>) -> ModuleResult {
        let metrics = Self::metrics(ctx);
        if metrics.unparsed_dates > 0 {
            tracing::warn!(
                unparsed = metrics.unparsed_dates,
                "schedule analysis skipped items without a parseable publish date"
            );
        }
        let recommendations = evaluate(RULES, &metrics);
        ModuleResult {
            key: self.key(),
            metrics: ModuleMetrics::Schedule(metrics),
            recommendations,
        }
    }
}

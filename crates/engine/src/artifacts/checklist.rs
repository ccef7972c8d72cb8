// ABOUTME: Issue-count audit checklist across metadata, engagement and schedule.
// ABOUTME: Each section lists counted issues with a status string; the summary totals them.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use serde::Serialize;

use super::{OPTIMAL_DESCRIPTION_CHARS, SHORT_DESCRIPTION_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS};
use crate::derive::DerivedItem;
use crate::finding::Priority;
use crate::modules::engagement::{GOOD_COMMENTS_PER_1K, GOOD_ENGAGEMENT_RATE, POOR_ENGAGEMENT_RATE};
use crate::modules::schedule::cadence;
use crate::modules::AuditContext;
use crate::stats::{mean, per_thousand};
use crate::text::{char_len, has_hashtag, has_timestamp};
use crate::timestamps::is_eligible;

const OPTIMAL_MIN_TAGS: usize = 8;
const GOOD: &str = "✓ Good";
const QUICK_FIX: &str = "✓ Yes";

static CALL_TO_ACTION: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(["subscribe", "like", "comment", "follow", "click", "watch"])
        .unwrap()
});
static VIDEO_LINK: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(["youtube.com", "youtu.be"])
        .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalIssue {
    pub issue: String,
    pub count: usize,
    pub percentage: String,
    pub impact: String,
    pub severity: Priority,
}

/// A measured value against its benchmark. Statuses starting with a
/// warning sign count as warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCheck {
    pub issue: String,
    pub current: String,
    pub benchmark: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
    pub status: String,
}

impl StatusCheck {
    fn is_warning(&self) -> bool {
        self.status.starts_with('⚠')
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opportunity {
    pub issue: String,
    pub count: usize,
    pub quick_fix: String,
    pub impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChecklistSummary {
    pub total_issues: usize,
    pub critical_issues: usize,
    pub warnings: usize,
    pub quick_wins: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
    pub estimated_fix_time: String,
    pub potential_impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditChecklist {
    pub critical_issues: Vec<CriticalIssue>,
    pub engagement_warnings: Vec<StatusCheck>,
    pub upload_schedule_issues: Vec<StatusCheck>,
    pub optimization_opportunities: Vec<Opportunity>,
    pub summary: ChecklistSummary,
}

fn share_of(count: usize, total: usize) -> String {
    if total == 0 {
        return "N/A".to_string();
    }
    format!("{:.0}%", count as f64 / total as f64 * 100.0)
}

fn avg_views(items: &[&DerivedItem<'_>]) -> f64 {
    let views: Vec<f64> = items.iter().map(|d| d.views() as f64).collect();
    mean(&views)
}

/// Signed percent difference of `value` against `baseline`.
fn relative_gap(value: f64, baseline: f64) -> f64 {
    if baseline > 0.0 {
        (value - baseline) / baseline * 100.0
    } else {
        0.0
    }
}

fn select<'i, 'a>(
    items: &'i [DerivedItem<'a>],
    pred: impl Fn(&DerivedItem<'a>) -> bool,
) -> Vec<&'i DerivedItem<'a>> {
    items.iter().filter(|d| pred(d)).collect()
}

type ItemCheck = fn(&DerivedItem<'_>) -> bool;

fn critical_issues(items: &[DerivedItem<'_>]) -> Vec<CriticalIssue> {
    let total = items.len();
    let mut issues = Vec::new();

    let untagged = select(items, |d| d.item.tags.is_empty());
    if !untagged.is_empty() {
        let tagged = select(items, |d| !d.item.tags.is_empty());
        let impact = if tagged.is_empty() {
            "All videos affected".to_string()
        } else {
            format!("{:+.0}% vs tagged", relative_gap(avg_views(&untagged), avg_views(&tagged)))
        };
        issues.push(CriticalIssue {
            issue: "Videos with 0 tags".to_string(),
            count: untagged.len(),
            percentage: share_of(untagged.len(), total),
            impact,
            severity: Priority::High,
        });
    }

    let sparse = select(items, |d| char_len(&d.item.description) < SHORT_DESCRIPTION_CHARS);
    if !sparse.is_empty() {
        let optimal = select(items, |d| char_len(&d.item.description) >= OPTIMAL_DESCRIPTION_CHARS);
        let impact = if optimal.is_empty() {
            "All videos affected".to_string()
        } else {
            format!("{:+.0}% vs optimal", relative_gap(avg_views(&sparse), avg_views(&optimal)))
        };
        issues.push(CriticalIssue {
            issue: "Videos with short descriptions (<100 chars)".to_string(),
            count: sparse.len(),
            percentage: share_of(sparse.len(), total),
            impact,
            severity: Priority::High,
        });
    }

    let eligible = select(items, |d| is_eligible(d));
    let missing = eligible.iter().filter(|d| !has_timestamp(&d.item.description)).count();
    if missing > 0 {
        issues.push(CriticalIssue {
            issue: "Videos missing timestamps (>2min duration)".to_string(),
            count: missing,
            percentage: share_of(missing, eligible.len()),
            impact: "-12% retention (est.)".to_string(),
            severity: Priority::Medium,
        });
    }

    let rows: [(&str, &str, Priority, ItemCheck); 3] = [
        (
            "Titles too long (>70 chars, truncated in search)",
            "-8% CTR (est.)",
            Priority::Medium,
            |d| char_len(&d.item.title) > TITLE_MAX_CHARS,
        ),
        (
            "Titles too short (<40 chars)",
            "-5% CTR (est.)",
            Priority::Low,
            |d| char_len(&d.item.title) < TITLE_MIN_CHARS,
        ),
        (
            "Videos with insufficient tags (<8)",
            "-10% discovery (est.)",
            Priority::Medium,
            |d| !d.item.tags.is_empty() && d.item.tags.len() < OPTIMAL_MIN_TAGS,
        ),
    ];
    for (issue, impact, severity, check) in rows {
        let count = items.iter().filter(|d| check(d)).count();
        if count > 0 {
            issues.push(CriticalIssue {
                issue: issue.to_string(),
                count,
                percentage: share_of(count, total),
                impact: impact.to_string(),
                severity,
            });
        }
    }

    issues
}

fn engagement_warnings(items: &[DerivedItem<'_>]) -> Vec<StatusCheck> {
    let rates: Vec<f64> = items.iter().map(|d| d.engagement_rate).collect();
    let average = mean(&rates);
    let poor = items
        .iter()
        .filter(|d| d.engagement_rate < POOR_ENGAGEMENT_RATE)
        .count();
    let views: u64 = items.iter().map(|d| d.views()).sum();
    let comments: u64 = items.iter().map(|d| d.item.statistics.comment_count).sum();
    let comments_per_1k = per_thousand(comments, views);

    vec![
        StatusCheck {
            issue: "Average engagement rate".to_string(),
            current: format!("{:.2}%", average),
            benchmark: format!("{:.1}%", GOOD_ENGAGEMENT_RATE),
            gap: Some(format!("{:+.0}%", relative_gap(average, GOOD_ENGAGEMENT_RATE))),
            status: if average >= GOOD_ENGAGEMENT_RATE { GOOD } else { "⚠️ Below" }.to_string(),
        },
        StatusCheck {
            issue: "Videos below 2% engagement".to_string(),
            current: poor.to_string(),
            benchmark: "0".to_string(),
            gap: Some(format!("{} affected", poor)),
            status: if poor == 0 { GOOD } else { "⚠️ Poor" }.to_string(),
        },
        StatusCheck {
            issue: "Comments per 1000 views".to_string(),
            current: format!("{:.1}", comments_per_1k),
            benchmark: format!("{}", GOOD_COMMENTS_PER_1K as u32),
            gap: Some(format!("{:+.0}%", relative_gap(comments_per_1k, GOOD_COMMENTS_PER_1K))),
            status: if comments_per_1k >= GOOD_COMMENTS_PER_1K { GOOD } else { "⚠️ Low" }.to_string(),
        },
    ]
}

fn schedule_issues(ctx: &AuditContext<'_>) -> Vec<StatusCheck> {
    let dates: Vec<_> = ctx.items.iter().filter_map(|d| d.published).collect();
    if dates.len() < 2 {
        return Vec::new();
    }
    let c = cadence(&dates, ctx.now);
    let mut checks = vec![StatusCheck {
        issue: "Uploads per week".to_string(),
        current: format!("{:.1}", c.uploads_per_week),
        benchmark: "1-2".to_string(),
        gap: None,
        status: if (1.0..=3.0).contains(&c.uploads_per_week) {
            GOOD
        } else if c.uploads_per_week < 1.0 {
            "⚠️ Low"
        } else {
            "⚠️ High"
        }
        .to_string(),
    }];

    if let Some(days) = c.days_since_last {
        checks.push(StatusCheck {
            issue: "Days since last upload".to_string(),
            current: format!("{}d", days),
            benchmark: "<7d".to_string(),
            gap: None,
            status: if days < 7 {
                GOOD
            } else if days < 30 {
                "⚠️ Stale"
            } else {
                "⚠️ Very Stale"
            }
            .to_string(),
        });
    }

    checks.push(StatusCheck {
        issue: "Upload consistency score".to_string(),
        current: format!("{:.1}/10", c.consistency_score),
        benchmark: "7+".to_string(),
        gap: None,
        status: if c.consistency_score >= 7.0 { GOOD } else { "⚠️ Inconsistent" }.to_string(),
    });

    if let Some(longest) = c.longest_gap_days {
        checks.push(StatusCheck {
            issue: "Longest gap between uploads".to_string(),
            current: format!("{}d", longest),
            benchmark: "<30d".to_string(),
            gap: None,
            status: if longest < 30 { GOOD } else { "⚠️ Problematic" }.to_string(),
        });
    }

    checks
}

fn optimization_opportunities(ctx: &AuditContext<'_>) -> Vec<Opportunity> {
    let brand = ctx.channel.title.to_lowercase();
    let items = ctx.items;

    let rows = [
        (
            "Missing brand tags",
            "+15% discovery (est.)",
            select(items, |d| !d.item.tags.iter().any(|t| t.to_lowercase().contains(&brand))).len(),
        ),
        (
            "No CTA in description",
            "+10% engagement (est.)",
            select(items, |d| !CALL_TO_ACTION.is_match(&d.item.description)).len(),
        ),
        (
            "No hashtags used",
            "+8% search (est.)",
            select(items, |d| !has_hashtag(&d.item.description)).len(),
        ),
        (
            "No video link in description",
            "+5% shareability (est.)",
            select(items, |d| !VIDEO_LINK.is_match(&d.item.description)).len(),
        ),
    ];

    rows.into_iter()
        .filter(|(_, _, n)| *n > 0)
        .map(|(issue, impact, n)| Opportunity {
            issue: issue.to_string(),
            count: n,
            quick_fix: QUICK_FIX.to_string(),
            impact: impact.to_string(),
        })
        .collect()
}

/// Builds the checklist. `minutes_per_fix` scales the time estimate.
pub fn audit_checklist(ctx: &AuditContext<'_>, minutes_per_fix: u32) -> AuditChecklist {
    let critical = critical_issues(ctx.items);
    let engagement = engagement_warnings(ctx.items);
    let schedule = schedule_issues(ctx);
    let opportunities = optimization_opportunities(ctx);

    let severity = |p: Priority| critical.iter().filter(|i| i.severity == p).count();
    let warnings = engagement
        .iter()
        .chain(schedule.iter())
        .filter(|c| c.is_warning())
        .count();

    let summary = ChecklistSummary {
        total_issues: critical.len() + warnings,
        critical_issues: critical.len(),
        warnings,
        quick_wins: opportunities.len(),
        high_priority: severity(Priority::High),
        medium_priority: severity(Priority::Medium),
        low_priority: severity(Priority::Low),
        estimated_fix_time: format!("{} minutes", opportunities.len() as u32 * minutes_per_fix),
        potential_impact: "+20-30% channel performance (est.)".to_string(),
    };

    AuditChecklist {
        critical_issues: critical,
        engagement_warnings: engagement,
        upload_schedule_issues: schedule,
        optimization_opportunities: opportunities,
        summary,
    }
}

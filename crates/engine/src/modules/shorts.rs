// ABOUTME: Short-form audit module, scored separately from the channel.
// ABOUTME: Aggregate Shorts metrics, benchmark-backed findings and a per-item opportunity audit.

use chrono::Duration;
use serde::Serialize;

use super::{AnalysisModule, AuditContext, ModuleMetrics, ModuleResult, ScoreScope};
use crate::derive::DerivedItem;
use crate::finding::{evaluate, Benchmark, Finding, FindingRule, Priority};
use crate::stats::{mean, median, per_thousand, percent, round_to};
use crate::text::{char_len, has_hashtag};

pub const TITLE_MIN_CHARS: usize = 20;
pub const TITLE_MAX_CHARS: usize = 70;
pub const SPARSE_DESCRIPTION_CHARS: usize = 40;
pub const MIN_COMMENTS_PER_1K: f64 = 5.0;
const TITLE_OUTSIDE_SHARE: f64 = 0.4;
const SPARSE_DESCRIPTION_SHARE: f64 = 0.5;
const FRESHNESS_MIN_SHORTS: usize = 5;
const FRESHNESS_MAX_DAYS: i64 = 21;
const RELATIVE_MIN_SHORTS: usize = 10;
const RELATIVE_ENGAGEMENT_FLOOR: f64 = 0.8;
const HOOK_CHECK_MIN_SHORTS: usize = 5;
const RECENT_WINDOW_DAYS: i64 = 30;

/// Opportunity text used when an item trips no check.
pub const NO_OPPORTUNITIES: &str = "No immediate opportunities flagged by configured checks.";

const METADATA_CLARITY: Benchmark = Benchmark {
    benchmark: "At least 60% of Shorts titles should land in 20-70 characters",
    why: "Concise but descriptive titles improve relevance and taps in Shorts surfaces.",
    source: "YouTube Creator Academy (Shorts metadata guidance, official)",
};

const DESCRIPTION_CONTEXT: Benchmark = Benchmark {
    benchmark: "No more than 50% of Shorts should have sparse descriptions (<40 chars) without hashtags",
    why: "Basic descriptive context and hashtags help categorization and discovery.",
    source: "YouTube Help Center + Creator Academy Shorts guidance (official)",
};

const POSTING_FRESHNESS: Benchmark = Benchmark {
    benchmark: "Publish at least one Short every 21 days for active Shorts channels",
    why: "Fresh publishing cadence supports momentum for Shorts viewers and distribution.",
    source: "YouTube Creator Insider cadence best-practice guidance (official)",
};

const ENGAGEMENT_RELATIVE: Benchmark = Benchmark {
    benchmark: "Shorts median engagement should be at least 80% of long-form median engagement",
    why: "Relative performance normalization avoids false positives on niche channels.",
    source: "Internal conservative heuristic (official-source-aligned)",
};

const COMMENTS_DEPTH: Benchmark = Benchmark {
    benchmark: "Comments per 1K views should be >= 5",
    why: "Comment activity indicates depth of resonance beyond passive views.",
    source: "YouTube community interaction guidance + conservative heuristic",
};

const NO_SHORTS: Benchmark = Benchmark {
    benchmark: "Shorts rule: <=60s, or 61-180s with #shorts in title/description",
    why: "Shorts should be evaluated separately due to different discovery mechanics.",
    source: "YouTube Help + Creator Academy Shorts fundamentals (official)",
};

/// Per-Short audit row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoAudit {
    pub video_id: String,
    pub video_url: String,
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    #[serde(rename = "durationSeconds")]
    pub duration_seconds: u64,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: f64,
    pub views: u64,
    #[serde(rename = "engagementRate")]
    pub engagement_rate: f64,
    #[serde(rename = "commentsPer1k")]
    pub comments_per_1k: f64,
    /// Zero when only the sentinel is listed.
    #[serde(rename = "opportunityCount")]
    pub opportunity_count: usize,
    #[serde(rename = "optimizationOpportunities")]
    pub optimization_opportunities: Vec<String>,
    #[serde(rename = "optimizationSummary")]
    pub optimization_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortsMetrics {
    pub shorts_count: usize,
    pub shorts_percent_of_channel: f64,
    pub avg_duration_seconds: f64,
    pub median_duration_seconds: f64,
    pub avg_views: f64,
    pub median_views: f64,
    pub avg_engagement_rate: f64,
    pub median_engagement_rate: f64,
    #[serde(rename = "commentsPer1k")]
    pub comments_per_1k: f64,
    pub posted_last30_days: usize,
    pub days_since_last_short: Option<i64>,
    pub metadata_coverage: f64,
    pub videos_with_opportunities: usize,
    pub total_video_opportunities: usize,
    pub video_audits: Vec<VideoAudit>,
    #[serde(skip)]
    titles_outside_range: usize,
    #[serde(skip)]
    sparse_descriptions: usize,
    #[serde(skip)]
    raw_median_engagement: f64,
    #[serde(skip)]
    raw_comments_per_1k: f64,
    #[serde(skip)]
    long_form_median_engagement: f64,
}

fn title_outside_range(title: &str) -> bool {
    let len = char_len(title);
    !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len)
}

fn sparse_description(description: &str) -> bool {
    char_len(description) < SPARSE_DESCRIPTION_CHARS && !has_hashtag(description)
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

const RULES: &[FindingRule<ShortsMetrics>] = &[
    FindingRule {
        name: "no_shorts",
        when: |m| m.shorts_count == 0,
        build: |_| {
            Finding::new(
                Priority::Informational,
                "Shorts",
                "No Shorts identified by configured rule",
                "If Shorts are part of strategy, publish an initial pilot batch and re-audit.",
                "Enables a measurable Shorts baseline and iterative optimization.",
            )
            .cited(&NO_SHORTS)
        },
    },
    FindingRule {
        name: "title_range",
        when: |m| share(m.titles_outside_range, m.shorts_count) > TITLE_OUTSIDE_SHARE,
        build: |m| {
            Finding::new(
                Priority::Medium,
                "Shorts",
                format!(
                    "{} Shorts have titles outside 20-70 characters",
                    m.titles_outside_range
                ),
                "Normalize Shorts titles to concise, intent-led phrasing in the 20-70 range.",
                "Improves tap propensity and relevance interpretation.",
            )
            .cited(&METADATA_CLARITY)
        },
    },
    FindingRule {
        name: "sparse_descriptions",
        when: |m| share(m.sparse_descriptions, m.shorts_count) > SPARSE_DESCRIPTION_SHARE,
        build: |m| {
            Finding::new(
                Priority::Medium,
                "Shorts",
                format!(
                    "{} Shorts have sparse descriptions without hashtags",
                    m.sparse_descriptions
                ),
                "Add one-line context and 1-3 relevant hashtags for each Short.",
                "Improves catalog clarity and potential discoverability.",
            )
            .cited(&DESCRIPTION_CONTEXT)
        },
    },
    FindingRule {
        name: "freshness",
        when: |m| {
            m.shorts_count >= FRESHNESS_MIN_SHORTS
                && m.days_since_last_short.is_some_and(|d| d > FRESHNESS_MAX_DAYS)
        },
        build: |m| {
            Finding::new(
                Priority::High,
                "Shorts",
                format!(
                    "No new Shorts in {} days",
                    m.days_since_last_short.unwrap_or_default()
                ),
                "Re-start a consistent Shorts cadence with a minimum monthly publishing floor.",
                "Restores freshness signals and audience recency.",
            )
            .cited(&POSTING_FRESHNESS)
        },
    },
    FindingRule {
        name: "relative_engagement",
        when: |m| {
            m.shorts_count >= RELATIVE_MIN_SHORTS
                && m.long_form_median_engagement > 0.0
                && m.raw_median_engagement
                    < RELATIVE_ENGAGEMENT_FLOOR * m.long_form_median_engagement
        },
        build: |_| {
            Finding::new(
                Priority::High,
                "Shorts",
                "Shorts median engagement materially underperforms long-form median",
                "Rework hooks, pacing, and payoff structure in first 2-3 seconds of Shorts.",
                "Raises retention and completion probability in Shorts feed.",
            )
            .cited(&ENGAGEMENT_RELATIVE)
        },
    },
    FindingRule {
        name: "comments_depth",
        when: |m| m.shorts_count > 0 && m.raw_comments_per_1k < MIN_COMMENTS_PER_1K,
        build: |m| {
            Finding::new(
                Priority::Medium,
                "Shorts",
                format!(
                    "Shorts comments depth is low ({:.1} comments per 1K views)",
                    m.raw_comments_per_1k
                ),
                "Use prompt-led CTAs in caption and pinned comment to spark responses.",
                "Improves signal depth beyond passive views.",
            )
            .cited(&COMMENTS_DEPTH)
        },
    },
];

/// Audits the Short items as their own format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortsModule;

impl ShortsModule {
    pub fn metrics(ctx: &AuditContext<'_>) -> ShortsMetrics {
        let shorts = &ctx.shorts;
        let count = shorts.len();

        let durations: Vec<f64> = shorts.iter().map(|d| d.duration_seconds as f64).collect();
        let views: Vec<f64> = shorts.iter().map(|d| d.views() as f64).collect();
        let engagement: Vec<f64> = shorts.iter().map(|d| d.engagement_rate).collect();
        let long_form_engagement: Vec<f64> =
            ctx.long_form.iter().map(|d| d.engagement_rate).collect();

        let total_views: u64 = shorts.iter().map(|d| d.views()).sum();
        let total_comments: u64 = shorts.iter().map(|d| d.item.statistics.comment_count).sum();
        let comments_per_1k = per_thousand(total_comments, total_views);

        let optimized = shorts
            .iter()
            .filter(|d| {
                !title_outside_range(&d.item.title)
                    && (char_len(&d.item.description) >= SPARSE_DESCRIPTION_CHARS
                        || has_hashtag(&d.item.description))
            })
            .count();

        let window_start = ctx.now - Duration::days(RECENT_WINDOW_DAYS);
        let dates: Vec<_> = shorts.iter().filter_map(|d| d.published).collect();
        let posted_recently = dates.iter().filter(|p| **p >= window_start).count();
        let days_since_last_short = dates.iter().max().map(|last| (ctx.now - *last).num_days());

        let median_engagement = median(&engagement);
        let video_audits = audit_items(ctx, median_engagement);
        let flagged: Vec<&VideoAudit> =
            video_audits.iter().filter(|a| a.opportunity_count > 0).collect();

        ShortsMetrics {
            shorts_count: count,
            shorts_percent_of_channel: round_to(percent(count, ctx.items.len()), 1),
            avg_duration_seconds: round_to(mean(&durations), 1),
            median_duration_seconds: round_to(median(&durations), 1),
            avg_views: round_to(mean(&views), 1),
            median_views: round_to(median(&views), 1),
            avg_engagement_rate: round_to(mean(&engagement), 2),
            median_engagement_rate: round_to(median_engagement, 2),
            comments_per_1k: round_to(comments_per_1k, 1),
            posted_last30_days: posted_recently,
            days_since_last_short,
            metadata_coverage: round_to(percent(optimized, count), 1),
            videos_with_opportunities: flagged.len(),
            total_video_opportunities: flagged.iter().map(|a| a.opportunity_count).sum(),
            titles_outside_range: shorts.iter().filter(|d| title_outside_range(&d.item.title)).count(),
            sparse_descriptions: shorts
                .iter()
                .filter(|d| sparse_description(&d.item.description))
                .count(),
            raw_median_engagement: median_engagement,
            raw_comments_per_1k: comments_per_1k,
            long_form_median_engagement: median(&long_form_engagement),
            video_audits,
        }
    }
}

/// One row per Short, by views descending.
fn audit_items(ctx: &AuditContext<'_>, median_engagement: f64) -> Vec<VideoAudit> {
    let mut ordered: Vec<&DerivedItem<'_>> = ctx.shorts.clone();
    ordered.sort_by(|a, b| b.views().cmp(&a.views()));
    let check_hooks = ctx.shorts.len() >= HOOK_CHECK_MIN_SHORTS;

    ordered
        .into_iter()
        .map(|d| {
            let item = d.item;
            let per_1k = per_thousand(item.statistics.comment_count, d.views());

            let mut opportunities = Vec::new();
            if title_outside_range(&item.title) {
                opportunities.push("Adjust title length into 20-70 character range.".to_string());
            }
            if sparse_description(&item.description) {
                opportunities.push("Add one-line context and 1-3 relevant hashtags.".to_string());
            }
            if per_1k < MIN_COMMENTS_PER_1K {
                opportunities
                    .push("Increase comment prompts (question CTA + pinned comment).".to_string());
            }
            if check_hooks && d.engagement_rate < median_engagement {
                opportunities.push("Strengthen first 2-second hook and pacing.".to_string());
            }

            let opportunity_count = opportunities.len();
            if opportunities.is_empty() {
                opportunities.push(NO_OPPORTUNITIES.to_string());
            }

            VideoAudit {
                video_id: item.id.clone(),
                video_url: ctx.video_url(&item.id),
                title: item.title.clone(),
                published_at: item.published_at.clone(),
                duration_seconds: d.duration_seconds,
                duration_minutes: round_to(d.duration_seconds as f64 / 60.0, 2),
                views: d.views(),
                engagement_rate: round_to(d.engagement_rate, 2),
                comments_per_1k: round_to(per_1k, 1),
                opportunity_count,
                optimization_summary: opportunities.join(" | "),
                optimization_opportunities: opportunities,
            }
        })
        .collect()
}

impl AnalysisModule for ShortsModule {
    fn key(&self) -> &'static str {
        "shorts2026"
    }

    fn scope(&self) -> ScoreScope {
        ScoreScope::Shorts
    }

    fn analyze(&self, ctx: &AuditContext<'_>) -> ModuleResult {
        let metrics = Self::metrics(ctx);
        let recommendations = evaluate(RULES, &metrics);
        ModuleResult {
            key: self.key(),
            metrics: ModuleMetrics::Shorts(metrics),
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::derive_items;
    use crate::models::{Channel, Item};
    use crate::modules::testing::item;
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap()
    }

    fn run(items: &[Item]) -> ModuleResult {
        let channel = Channel::default();
        let derived = derive_items(items);
        let ctx = AuditContext::new(&channel, &derived, now());
        ShortsModule.analyze(&ctx)
    }

    fn metrics(result: &ModuleResult) -> &ShortsMetrics {
        match &result.metrics {
            ModuleMetrics::Shorts(m) => m,
            other => panic!("unexpected metrics {other:?}"),
        }
    }

    #[test]
    fn empty_set_yields_single_informational_finding() {
        let items = vec![item("long", "A long-form video", "PT10M", 500, 10, 2)];
        let result = run(&items);
        let m = metrics(&result);
        assert_eq!(m.shorts_count, 0);
        assert_eq!(m.days_since_last_short, None);
        assert!(m.video_audits.is_empty());
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].priority, Priority::Informational);
        assert_eq!(ShortsModule.scope(), ScoreScope::Shorts);

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["daysSinceLastShort"].is_null());
        assert_eq!(json["videoAudits"], serde_json::json!([]));
    }

    #[test]
    fn aggregates_and_per_item_rows() {
        let mut well_made = item("s1", "A well sized Shorts title here", "PT30S", 1000, 80, 20);
        well_made.description = "Quick tip #cooking".to_string();
        let terse = item("s2", "Short", "PT45S", 3000, 30, 3);
        let items = vec![well_made, terse, item("l1", "Long-form upload", "PT10M", 100, 5, 1)];

        let result = run(&items);
        let m = metrics(&result);
        assert_eq!(m.shorts_count, 2);
        assert_eq!(m.shorts_percent_of_channel, 66.7);
        assert_eq!(m.avg_duration_seconds, 37.5);
        assert_eq!(m.median_duration_seconds, 37.5);
        assert_eq!(m.metadata_coverage, 50.0);
        assert_eq!(m.days_since_last_short, Some(9));
        assert_eq!(m.posted_last30_days, 2);

        // ordered by views
        assert_eq!(m.video_audits[0].video_id, "s2");
        assert_eq!(m.video_audits[0].opportunity_count, 3);
        assert_eq!(m.video_audits[0].video_url, "https://youtube.com/watch?v=s2");
        assert_eq!(m.video_audits[1].opportunity_count, 0);
        assert_eq!(m.video_audits[1].optimization_opportunities, vec![NO_OPPORTUNITIES.to_string()]);
        assert_eq!(m.video_audits[1].optimization_summary, NO_OPPORTUNITIES);
        assert_eq!(m.videos_with_opportunities, 1);
        assert_eq!(m.total_video_opportunities, 3);
    }

    #[test]
    fn share_rules_fire_above_cutoffs() {
        let items: Vec<Item> = (0..3)
            .map(|i| item(&format!("s{i}"), "Tiny", "PT20S", 1000, 10, 1))
            .collect();
        let result = run(&items);
        let issues: Vec<&str> = result.recommendations.iter().map(|f| f.issue.as_str()).collect();
        assert_eq!(
            issues,
            vec![
                "3 Shorts have titles outside 20-70 characters",
                "3 Shorts have sparse descriptions without hashtags",
                "Shorts comments depth is low (1.0 comments per 1K views)",
            ]
        );
        assert!(result.recommendations.iter().all(|f| f.source.is_some()));
    }

    #[test]
    fn freshness_needs_five_shorts() {
        let make = |n: usize| -> Vec<Item> {
            (0..n)
                .map(|i| {
                    let mut it = item(&format!("s{i}"), "A perfectly fine short title", "PT20S", 1000, 50, 10);
                    it.published_at = "2024-12-01T00:00:00Z".to_string();
                    it.description = "#tips".to_string();
                    it
                })
                .collect()
        };
        let stale = |r: &ModuleResult| r.recommendations.iter().any(|f| f.issue.starts_with("No new Shorts"));
        assert!(!stale(&run(&make(4))));
        let result = run(&make(5));
        assert!(stale(&result));
        assert_eq!(result.recommendations[0].issue, "No new Shorts in 50 days");
    }

    fn tidy_short(id: &str, likes: u64) -> Item {
        let mut it = item(id, "A perfectly fine short title", "PT20S", 1000, likes, 10);
        it.description = "#tips".to_string();
        it
    }

    const HOOK: &str = "Strengthen first 2-second hook and pacing.";

    fn hook_flags(result: &ModuleResult) -> usize {
        metrics(result)
            .video_audits
            .iter()
            .filter(|a| a.optimization_opportunities.iter().any(|o| o == HOOK))
            .count()
    }

    #[test]
    fn hook_check_needs_five_shorts() {
        let make = |n: u64| -> Vec<Item> {
            (0..n).map(|i| tidy_short(&format!("s{i}"), 10 + i * 10)).collect()
        };

        assert_eq!(hook_flags(&run(&make(4))), 0);

        // rates 2..=6, median 4
        let result = run(&make(5));
        assert_eq!(hook_flags(&result), 2);
        let flagged: Vec<&str> = metrics(&result)
            .video_audits
            .iter()
            .filter(|a| a.opportunity_count > 0)
            .map(|a| a.video_id.as_str())
            .collect();
        assert_eq!(flagged, vec!["s0", "s1"]);
    }

    #[test]
    fn relative_engagement_needs_ten_shorts() {
        let make = |n: usize| -> Vec<Item> {
            let mut items: Vec<Item> = (0..n).map(|i| tidy_short(&format!("s{i}"), 10)).collect();
            items.push(item("l1", "Long-form upload", "PT10M", 1000, 90, 10));
            items
        };
        let underperforms = |r: &ModuleResult| {
            r.recommendations
                .iter()
                .any(|f| f.issue == "Shorts median engagement materially underperforms long-form median")
        };

        assert!(!underperforms(&run(&make(9))));
        let result = run(&make(10));
        assert!(underperforms(&result));
        let finding = result
            .recommendations
            .iter()
            .find(|f| f.issue.contains("materially"))
            .unwrap();
        assert_eq!(finding.priority, Priority::High);
    }

    #[test]
    fn relative_engagement_skips_zero_long_form_median() {
        let mut items: Vec<Item> = (0..10).map(|i| tidy_short(&format!("s{i}"), 10)).collect();
        items.push(item("l1", "Long-form upload", "PT10M", 0, 0, 0));
        let result = run(&items);
        assert!(!result.recommendations.iter().any(|f| f.issue.contains("materially")));
    }
}

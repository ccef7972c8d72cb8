// ABOUTME: Engagement analysis module.
// ABOUTME: Channel-wide rates, top/bottom performers by engagement and mean +/- 2 sigma outliers.

use serde::Serialize;

use super::{AnalysisModule, AuditContext, ModuleMetrics, ModuleResult};
use crate::derive::DerivedItem;
use crate::finding::{evaluate, Benchmark, Finding, FindingRule, Priority};
use crate::stats::{mean, per_thousand, round_to, std_dev};
use crate::text::{char_len, truncate_chars};

/// Below this average engagement rate (%) the audience is passive.
pub const POOR_ENGAGEMENT_RATE: f64 = 2.0;
/// Benchmark "good" engagement rate (%).
pub const GOOD_ENGAGEMENT_RATE: f64 = 4.0;
const EXCELLENT_ENGAGEMENT_RATE: f64 = 5.0;
/// Minimum healthy comments per 1000 views.
pub const MIN_COMMENTS_PER_1K: f64 = 5.0;
/// Benchmark "good" comments per 1000 views.
pub const GOOD_COMMENTS_PER_1K: f64 = 10.0;
const PERFORMER_COUNT: usize = 5;
const OUTLIER_SIGMAS: f64 = 2.0;

pub const ENGAGEMENT_RATE_FORMULA: &str = "(Likes + Comments) / Views × 100";

const ENGAGEMENT_RATE: Benchmark = Benchmark {
    benchmark: "Industry Standard: Good = 4.0%, Excellent = 6.0%",
    why: "Engagement rate (likes + comments / views) signals content quality to YouTube's algorithm. Higher engagement improves search rankings and recommendations.",
    source: "Social Blade & VidIQ Analytics 2024",
};

const COMMENTS_PER_1K: Benchmark = Benchmark {
    benchmark: "Industry Standard: Minimum = 5, Good = 10, Excellent = 20",
    why: "Comments are heavily weighted by YouTube's algorithm. Videos that spark conversation get promoted more in search and suggested videos.",
    source: "YouTube Algorithm Research 2024",
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performer {
    pub title: String,
    pub engagement_rate: f64,
    pub views: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutlierCounts {
    pub high: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub average_engagement_rate: f64,
    pub likes_per_thousand_views: f64,
    pub comments_per_thousand_views: f64,
    pub top_performers: Vec<Performer>,
    pub bottom_performers: Vec<Performer>,
    pub outliers: OutlierCounts,
    #[serde(skip)]
    raw_average: f64,
    #[serde(skip)]
    raw_comments_per_1k: f64,
    #[serde(skip)]
    top_title_length: f64,
    #[serde(skip)]
    bottom_title_length: f64,
    #[serde(skip)]
    top_tag_count: f64,
    #[serde(skip)]
    bottom_tag_count: f64,
    #[serde(skip)]
    high_outlier_titles: Vec<String>,
}

const RULES: &[FindingRule<EngagementMetrics>] = &[
    FindingRule {
        name: "low_engagement",
        when: |m| m.raw_average < POOR_ENGAGEMENT_RATE,
        build: |m| {
            Finding::new(
                Priority::High,
                "Engagement",
                format!("Low average engagement rate: {:.2}%", m.raw_average),
                "Add clear calls-to-action (CTAs) in videos asking viewers to like and comment",
                "Engagement rate below 2% indicates passive audience; CTAs can double engagement",
            )
            .cited(&ENGAGEMENT_RATE)
            .with_formula(ENGAGEMENT_RATE_FORMULA)
        },
    },
    FindingRule {
        name: "excellent_engagement",
        when: |m| m.raw_average > EXCELLENT_ENGAGEMENT_RATE,
        build: |m| {
            Finding::new(
                Priority::Low,
                "Engagement",
                format!("Excellent engagement rate: {:.2}%", m.raw_average),
                "Maintain current engagement strategies and analyze top performers for patterns",
                "Above 5% is exceptional; preserve what works",
            )
        },
    },
    FindingRule {
        name: "low_comments",
        when: |m| m.raw_comments_per_1k < MIN_COMMENTS_PER_1K,
        build: |m| {
            Finding::new(
                Priority::High,
                "Engagement",
                format!(
                    "Low comment rate: {:.1} comments per 1000 views",
                    m.raw_comments_per_1k
                ),
                "Ask questions in videos and pin engaging comments to encourage discussion",
                "Comments are heavily weighted by algorithm; increasing them improves visibility",
            )
            .cited(&COMMENTS_PER_1K)
        },
    },
    FindingRule {
        name: "top_use_shorter_titles",
        when: |m| m.top_title_length < m.bottom_title_length - 10.0,
        build: |m| {
            Finding::new(
                Priority::Medium,
                "Engagement",
                "Top performing videos have shorter titles",
                format!(
                    "Consider shorter titles (avg {} chars) like your best performers",
                    m.top_title_length as u64
                ),
                "Align with proven engagement patterns",
            )
        },
    },
    FindingRule {
        name: "top_use_more_tags",
        when: |m| m.top_tag_count > m.bottom_tag_count + 3.0,
        build: |m| {
            Finding::new(
                Priority::Medium,
                "Engagement",
                "Top performing videos have more tags",
                format!(
                    "Use {} tags like your highest engagement videos",
                    m.top_tag_count as u64
                ),
                "Match metadata strategy of successful content",
            )
        },
    },
    FindingRule {
        name: "high_outliers",
        when: |m| m.outliers.high > 0,
        build: |m| {
            Finding::new(
                Priority::High,
                "Engagement",
                format!("{} videos have exceptionally high engagement", m.outliers.high),
                format!(
                    "Analyze these outliers for replicable patterns: {}...",
                    m.high_outlier_titles.join(", ")
                ),
                "Replicate successful formulas to increase overall engagement",
            )
        },
    },
];

fn performer(d: &DerivedItem<'_>) -> Performer {
    Performer {
        title: d.item.title.clone(),
        engagement_rate: d.engagement_rate,
        views: d.views(),
    }
}

fn mean_of<F>(items: &[&DerivedItem<'_>], f: F) -> f64
where
    F: Fn(&DerivedItem<'_>) -> f64,
{
    let values: Vec<f64> = items.iter().map(|d| f(d)).collect();
    mean(&values)
}

/// Engagement across the whole catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngagementModule;

impl EngagementModule {
    pub fn metrics(ctx: &AuditContext<'_>) -> EngagementMetrics {
        let items = ctx.items;
        let total_views: u64 = items.iter().map(|d| d.views()).sum();
        let total_likes: u64 = items.iter().map(|d| d.item.statistics.like_count).sum();
        let total_comments: u64 = items.iter().map(|d| d.item.statistics.comment_count).sum();

        let rates: Vec<f64> = items.iter().map(|d| d.engagement_rate).collect();
        let raw_average = mean(&rates);
        let spread = std_dev(&rates);

        let mut ranked: Vec<&DerivedItem<'_>> = items.iter().collect();
        ranked.sort_by(|a, b| b.engagement_rate.total_cmp(&a.engagement_rate));
        let top: Vec<&DerivedItem<'_>> = ranked.iter().take(PERFORMER_COUNT).copied().collect();
        let bottom: Vec<&DerivedItem<'_>> = ranked[ranked.len().saturating_sub(PERFORMER_COUNT)..].to_vec();

        let upper = raw_average + OUTLIER_SIGMAS * spread;
        let lower = raw_average - OUTLIER_SIGMAS * spread;
        let high_outliers: Vec<&DerivedItem<'_>> =
            items.iter().filter(|d| d.engagement_rate > upper).collect();
        let low_outliers = items.iter().filter(|d| d.engagement_rate < lower).count();

        let raw_comments_per_1k = per_thousand(total_comments, total_views);

        EngagementMetrics {
            average_engagement_rate: round_to(raw_average, 2),
            likes_per_thousand_views: round_to(per_thousand(total_likes, total_views), 1),
            comments_per_thousand_views: round_to(raw_comments_per_1k, 1),
            top_performers: top.iter().map(|d| performer(d)).collect(),
            bottom_performers: bottom.iter().map(|d| performer(d)).collect(),
            outliers: OutlierCounts {
                high: high_outliers.len(),
                low: low_outliers,
            },
            raw_average,
            raw_comments_per_1k,
            top_title_length: mean_of(&top, |d| char_len(&d.item.title) as f64),
            bottom_title_length: mean_of(&bottom, |d| char_len(&d.item.title) as f64),
            top_tag_count: mean_of(&top, |d| d.item.tags.len() as f64),
            bottom_tag_count: mean_of(&bottom, |d| d.item.tags.len() as f64),
            high_outlier_titles: high_outliers
                .iter()
                .take(3)
                .map(|d| truncate_chars(&d.item.title, 50))
                .collect(),
        }
    }
}

impl AnalysisModule for EngagementModule {
    fn key(&self) -> &'static str {
        "engagement"
    }

    fn analyze(&self, ctx: &AuditContext<'_>) -> ModuleResult {
        let metrics = Self::metrics(ctx);
        let recommendations = if ctx.items.is_empty() {
            Vec::new()
        } else {
            evaluate(RULES, &metrics)
        };
        ModuleResult {
            key: self.key(),
            metrics: ModuleMetrics::Engagement(metrics),
            recommendations,
        }
    }
}

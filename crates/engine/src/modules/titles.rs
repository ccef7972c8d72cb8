// ABOUTME: Title and description analysis module.
// ABOUTME: Title lengths, high-tier keywords, description lengths and chapter timestamp counts.

use serde::Serialize;

use super::{AnalysisModule, AuditContext, ModuleMetrics, ModuleResult};
use crate::finding::{evaluate, Finding, FindingRule, Priority};
use crate::stats::{mean, round_to, tier_by_views, Tier};
use crate::text::{char_len, has_timestamp, top_keywords, KEYWORD_STOP_WORDS};

pub const TITLE_MIN_CHARS: f64 = 40.0;
pub const TITLE_MAX_CHARS: f64 = 70.0;
pub const SHORT_DESCRIPTION_CHARS: usize = 100;
const SHORT_DESCRIPTION_SHARE: f64 = 0.3;
const TIMESTAMP_SHARE: f64 = 0.5;
const KEYWORD_LIMIT: usize = 10;

/// Item counts per view tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleMetrics {
    pub title_length_average: f64,
    pub title_length_high_performers: f64,
    pub common_keywords: Vec<(String, usize)>,
    pub description_length_average: f64,
    pub videos_with_timestamps: usize,
    pub performance_tiers: TierCounts,
    #[serde(skip)]
    raw_title_average: f64,
    #[serde(skip)]
    item_count: usize,
    #[serde(skip)]
    short_descriptions: usize,
}

const RULES: &[FindingRule<TitleMetrics>] = &[
    FindingRule {
        name: "titles_too_long",
        when: |m| m.raw_title_average > TITLE_MAX_CHARS,
        build: |m| {
            Finding::new(
                Priority::Medium,
                "Titles",
                format!("Average title length is {} characters", m.raw_title_average as u64),
                "Shorten titles to 60-70 characters for better visibility in search results",
                "Better click-through rates in search and suggested videos",
            )
        },
    },
    FindingRule {
        name: "titles_too_short",
        when: |m| m.raw_title_average < TITLE_MIN_CHARS,
        build: |m| {
            Finding::new(
                Priority::Medium,
                "Titles",
                format!("Average title length is {} characters", m.raw_title_average as u64),
                "Expand titles to 50-70 characters to include more relevant keywords",
                "Improved SEO and discoverability",
            )
        },
    },
    FindingRule {
        name: "high_tier_keywords",
        when: |m| !m.common_keywords.is_empty(),
        build: |m| {
            let quoted: Vec<String> = m
                .common_keywords
                .iter()
                .take(5)
                .map(|(word, _)| format!("\"{word}\""))
                .collect();
            Finding::new(
                Priority::High,
                "Titles",
                "High-performing videos use specific keyword patterns",
                format!(
                    "Incorporate these high-impact keywords more frequently: {}",
                    quoted.join(", ")
                ),
                "Align with proven successful content patterns",
            )
        },
    },
    FindingRule {
        name: "short_descriptions",
        when: |m| m.short_descriptions as f64 > m.item_count as f64 * SHORT_DESCRIPTION_SHARE,
        build: |m| {
            Finding::new(
                Priority::High,
                "Descriptions",
                format!(
                    "{} videos have descriptions under {} characters",
                    m.short_descriptions, SHORT_DESCRIPTION_CHARS
                ),
                "Write detailed descriptions (300-500 chars) with keywords in the first 150 characters",
                "Better SEO, more context for viewers and algorithm",
            )
        },
    },
    FindingRule {
        name: "few_timestamps",
        when: |m| (m.videos_with_timestamps as f64) < m.item_count as f64 * TIMESTAMP_SHARE,
        build: |m| {
            Finding::new(
                Priority::Medium,
                "Descriptions",
                format!("Only {} videos have timestamps", m.videos_with_timestamps),
                "Add timestamps to video descriptions for better viewer experience",
                "Improved watch time, viewer satisfaction, and YouTube features like key moments",
            )
        },
    },
];

/// Titles and descriptions across the whole catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitlesModule;

impl TitlesModule {
    pub fn metrics(ctx: &AuditContext<'_>) -> TitleMetrics {
        let items = ctx.items;
        let title_lengths: Vec<f64> = items.iter().map(|d| char_len(&d.item.title) as f64).collect();
        let desc_lengths: Vec<usize> = items.iter().map(|d| char_len(&d.item.description)).collect();

        let tiers = tier_by_views(items, |d| d.views());
        let mut counts = TierCounts::default();
        for (tier, _) in &tiers {
            match tier {
                Tier::High => counts.high += 1,
                Tier::Medium => counts.medium += 1,
                Tier::Low => counts.low += 1,
            }
        }
        let high_titles: Vec<&str> = tiers
            .iter()
            .filter(|(tier, _)| *tier == Tier::High)
            .map(|(_, d)| d.item.title.as_str())
            .collect();
        let high_lengths: Vec<f64> = high_titles.iter().map(|t| char_len(t) as f64).collect();

        let raw_title_average = mean(&title_lengths);
        let desc_as_f64: Vec<f64> = desc_lengths.iter().map(|&l| l as f64).collect();

        TitleMetrics {
            title_length_average: round_to(raw_title_average, 1),
            title_length_high_performers: round_to(mean(&high_lengths), 1),
            common_keywords: top_keywords(high_titles.iter().copied(), KEYWORD_STOP_WORDS, KEYWORD_LIMIT),
            description_length_average: round_to(mean(&desc_as_f64), 1),
            videos_with_timestamps: items
                .iter()
                .filter(|d| has_timestamp(&d.item.description))
                .count(),
            performance_tiers: counts,
            raw_title_average,
            item_count: items.len(),
            short_descriptions: desc_lengths
                .iter()
                .filter(|&&l| l < SHORT_DESCRIPTION_CHARS)
                .count(),
        }
    }
}

impl AnalysisModule for TitlesModule {
    fn key(&self) -> &'static str {
        "titlesAndDescriptions"
    }

    fn analyze(&self, ctx: &AuditContext<'_>) -> ModuleResult {
        let metrics = Self::metrics(ctx);
        // averages over an empty catalog say nothing
        let recommendations = if ctx.items.is_empty() {
            Vec::new()
        } else {
            evaluate(RULES, &metrics)
        };
        ModuleResult {
            key: self.key(),
            metrics: ModuleMetrics::Titles(metrics),
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
    use chrono::Utc;

    fn run(items: &[Item]) -> ModuleResult {
        let channel = Channel::default();
        let derived = derive_items(items);
        let ctx = AuditContext::new(&channel, &derived, Utc::now());
        TitlesModule.analyze(&ctx)
    }

    fn metrics(result: &ModuleResult) -> &TitleMetrics {
        match &result.metrics {
            ModuleMetrics::Titles(m) => m,
            other => panic!("unexpected metrics {other:?}"),
        }
    }

    #[test]
    fn keywords_come_from_top_third() {
        let items = vec![
            item("a", "Sourdough bread masterclass", "PT10M", 9000, 0, 0),
            item("b", "Bread basics", "PT10M", 100, 0, 0),
            item("c", "Pizza night", "PT10M", 50, 0, 0),
        ];
        let result = run(&items);
        let m = metrics(&result);
        assert_eq!(m.performance_tiers, TierCounts { high: 1, medium: 1, low: 1 });
        assert_eq!(
            m.common_keywords,
            vec![
                ("sourdough".to_string(), 1),
                ("bread".to_string(), 1),
                ("masterclass".to_string(), 1)
            ]
        );
        assert_eq!(m.title_length_high_performers, 27.0);
        assert!(result
            .recommendations
            .iter()
            .any(|f| f.priority == Priority::High && f.recommendation.contains("\"sourdough\"")));
    }

    #[test]
    fn long_titles_and_missing_timestamps_fire() {
        let long = "A".repeat(80);
        let mut items = vec![item("a", &long, "PT10M", 10, 0, 0), item("b", &long, "PT10M", 5, 0, 0)];
        items[0].description = "0:00 intro ".repeat(20);
        let result = run(&items);
        let issues: Vec<&str> = result.recommendations.iter().map(|f| f.issue.as_str()).collect();
        assert!(issues.contains(&"Average title length is 80 characters"));
        // one of two has timestamps: 1 < 2 * 0.5 is false
        assert!(!issues.iter().any(|i| i.starts_with("Only")));
        // b has an empty description: 1 > 0.6
        assert!(issues.contains(&"1 videos have descriptions under 100 characters"));
    }

    #[test]
    fn empty_catalog_is_safe() {
        let result = run(&[]);
        let m = metrics(&result);
        assert_eq!(m.title_length_average, 0.0);
        assert!(m.common_keywords.is_empty());
        assert!(result.recommendations.is_empty());
    }
}

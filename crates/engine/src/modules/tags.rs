// ABOUTME: Tags and metadata analysis module.
// ABOUTME: Tag counts, untagged items, brand tags shared by >30% of items, and category consistency.

use serde::Serialize;

use super::{AnalysisModule, AuditContext, ModuleMetrics, ModuleResult};
use crate::finding::{evaluate, Finding, FindingRule, Priority};
use crate::stats::{frequency_table, mean, percent, round_to};

const MIN_AVERAGE_TAGS: f64 = 5.0;
const MAX_AVERAGE_TAGS: f64 = 15.0;
const BRAND_TAG_SHARE: f64 = 0.3;
const BRAND_CANDIDATES: usize = 20;
const COMMON_TAGS_LIMIT: usize = 15;
const MIN_CATEGORY_CONSISTENCY: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagMetrics {
    pub average_tag_count: f64,
    pub videos_without_tags: usize,
    pub common_tags: Vec<(String, usize)>,
    pub brand_tags: Vec<(String, usize)>,
    pub category_consistency: f64,
    pub most_common_category: String,
    #[serde(skip)]
    raw_average: f64,
    #[serde(skip)]
    raw_consistency: f64,
}

const RULES: &[FindingRule<TagMetrics>] = &[
    FindingRule {
        name: "too_few_tags",
        when: |m| m.raw_average < MIN_AVERAGE_TAGS,
        build: |m| {
            Finding::new(
                Priority::High,
                "Tags",
                format!("Average tag count is only {} per video", m.raw_average as u64),
                "Use 8-12 relevant tags per video, mixing broad and specific keywords",
                "Significantly improved discoverability and search ranking",
            )
        },
    },
    FindingRule {
        name: "too_many_tags",
        when: |m| m.raw_average > MAX_AVERAGE_TAGS,
        build: |m| {
            Finding::new(
                Priority::Medium,
                "Tags",
                format!("Average tag count is {} per video", m.raw_average as u64),
                "Reduce to 8-12 most relevant tags. Quality over quantity.",
                "More focused targeting and better algorithm understanding",
            )
        },
    },
    FindingRule {
        name: "zero_tags",
        when: |m| m.videos_without_tags > 0,
        build: |m| {
            Finding::new(
                Priority::High,
                "Tags",
                format!("{} videos have no tags", m.videos_without_tags),
                "Add relevant tags to all videos immediately",
                "Critical for basic discoverability",
            )
        },
    },
    FindingRule {
        name: "no_brand_tags",
        when: |m| m.brand_tags.is_empty(),
        build: |_| {
            Finding::new(
                Priority::High,
                "Tags",
                "No consistent brand tags across videos",
                "Create 2-3 brand tags (e.g., channel name, niche) and use them in every video",
                "Stronger channel identity and easier content grouping",
            )
        },
    },
    FindingRule {
        name: "brand_tags_in_use",
        when: |m| !m.brand_tags.is_empty(),
        build: |m| {
            let names: Vec<String> = m
                .brand_tags
                .iter()
                .take(3)
                .map(|(tag, _)| format!("\"{tag}\""))
                .collect();
            Finding::new(
                Priority::Low,
                "Tags",
                format!("Good use of brand tags: {}", names.join(", ")),
                "Continue using these brand tags consistently",
                "Maintain strong channel identity",
            )
        },
    },
    FindingRule {
        name: "category_drift",
        when: |m| m.raw_consistency < MIN_CATEGORY_CONSISTENCY,
        build: |m| {
            Finding::new(
                Priority::Medium,
                "Metadata",
                format!("Category consistency is only {}%", m.raw_consistency as u64),
                "Use consistent category selection to help YouTube understand your niche",
                "Better content classification and recommendations",
            )
        },
    },
];

/// Tag usage and category selection across the whole catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagsModule;

impl TagsModule {
    pub fn metrics(ctx: &AuditContext<'_>) -> TagMetrics {
        let items = ctx.items;
        let total = items.len();
        let tag_counts: Vec<f64> = items.iter().map(|d| d.item.tags.len() as f64).collect();
        let raw_average = mean(&tag_counts);

        let mut tag_table = frequency_table(
            items
                .iter()
                .flat_map(|d| d.item.tags.iter().map(|t| t.to_lowercase())),
        );
        tag_table.truncate(BRAND_CANDIDATES);

        let brand_tags: Vec<(String, usize)> = tag_table
            .iter()
            .filter(|(_, count)| *count as f64 > total as f64 * BRAND_TAG_SHARE)
            .cloned()
            .collect();

        let categories = frequency_table(
            items
                .iter()
                .map(|d| d.item.category_id.as_str())
                .filter(|c| !c.is_empty()),
        );
        let (most_common_category, top_count) = categories
            .first()
            .map(|(c, n)| (c.to_string(), *n))
            .unwrap_or_else(|| ("Unknown".to_string(), 0));
        let raw_consistency = percent(top_count, total);

        let mut common_tags = tag_table;
        common_tags.truncate(COMMON_TAGS_LIMIT);

        TagMetrics {
            average_tag_count: round_to(raw_average, 1),
            videos_without_tags: items.iter().filter(|d| d.item.tags.is_empty()).count(),
            common_tags,
            brand_tags,
            category_consistency: round_to(raw_consistency, 1),
            most_common_category,
            raw_average,
            raw_consistency,
        }
    }
}

impl AnalysisModule for TagsModule {
    fn key(&self) -> &'static str {
        "tagsAndMetadata"
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
            metrics: ModuleMetrics::Tags(metrics),
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
    use pretty_assertions::assert_eq;

    fn run(items: &[Item]) -> (TagMetrics, Vec<Finding>) {
        let channel = Channel::default();
        let derived = derive_items(items);
        let ctx = AuditContext::new(&channel, &derived, Utc::now());
        let result = TagsModule.analyze(&ctx);
        match result.metrics {
            ModuleMetrics::Tags(m) => (m, result.recommendations),
            other => panic!("unexpected metrics {other:?}"),
        }
    }

    #[test]
    fn all_untagged_items() {
        let mut items = vec![
            item("a", "one", "PT5M", 10, 1, 0),
            item("b", "two", "PT5M", 10, 1, 0),
        ];
        for it in &mut items {
            it.tags.clear();
        }
        let (m, findings) = run(&items);
        assert_eq!(m.videos_without_tags, 2);
        assert!(m.brand_tags.is_empty());
        let zero = findings
            .iter()
            .find(|f| f.issue == "2 videos have no tags")
            .expect("zero tag finding");
        assert_eq!(zero.priority, Priority::High);
        assert!(findings.iter().any(|f| f.issue == "No consistent brand tags across videos"));
    }

    #[test]
    fn brand_tags_are_case_folded() {
        let mut items = vec![
            item("a", "one", "PT5M", 10, 1, 0),
            item("b", "two", "PT5M", 10, 1, 0),
            item("c", "three", "PT5M", 10, 1, 0),
            item("d", "four", "PT5M", 10, 1, 0),
        ];
        items[0].tags = vec!["Cooking".into(), "bread".into()];
        items[1].tags = vec!["cooking".into()];
        items[2].tags = vec!["COOKING".into(), "pasta".into()];
        items[3].tags = vec!["misc".into()];
        let (m, findings) = run(&items);
        assert_eq!(m.brand_tags, vec![("cooking".to_string(), 3)]);
        assert_eq!(m.common_tags[0], ("cooking".to_string(), 3));
        assert!(findings
            .iter()
            .any(|f| f.priority == Priority::Low && f.issue == "Good use of brand tags: \"cooking\""));
    }

    #[test]
    fn category_consistency_uses_top_category() {
        let mut items = vec![
            item("a", "one", "PT5M", 10, 1, 0),
            item("b", "two", "PT5M", 10, 1, 0),
            item("c", "three", "PT5M", 10, 1, 0),
            item("d", "four", "PT5M", 10, 1, 0),
        ];
        items[3].category_id = "10".into();
        let (m, findings) = run(&items);
        assert_eq!(m.most_common_category, "22");
        assert_eq!(m.category_consistency, 75.0);
        assert!(findings.iter().any(|f| f.issue == "Category consistency is only 75%"));
    }

    #[test]
    fn missing_categories_read_as_unknown() {
        let mut items = vec![item("a", "one", "PT5M", 10, 1, 0)];
        items[0].category_id.clear();
        let (m, _) = run(&items);
        assert_eq!(m.most_common_category, "Unknown");
        assert_eq!(m.category_consistency, 0.0);
    }
}

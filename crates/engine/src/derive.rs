// ABOUTME: Metric Deriver producing one DerivedItem per raw item.
// ABOUTME: Engagement rate, parsed duration, parsed publish time and format, computed once per run.

use chrono::{DateTime, Utc};

use crate::classify::{classify, Format};
use crate::duration_parse::parse_iso8601_duration;
use crate::models::{Item, Statistics};
use crate::stats::round_to;
use crate::time_parse::parse_published_time;

/// A raw item plus the fields every module needs. Borrows the caller's
/// record instead of mutating it.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedItem<'a> {
    pub item: &'a Item,
    pub engagement_rate: f64,
    pub duration_seconds: u64,
    pub published: Option<DateTime<Utc>>,
    pub format: Format,
}

impl<'a> DerivedItem<'a> {
    pub fn views(&self) -> u64 {
        self.item.statistics.view_count
    }

    pub fn is_short(&self) -> bool {
        self.format == Format::Short
    }
}

/// `(likes + comments) / views * 100` rounded to 2 decimals; 0.0 without views.
pub fn engagement_rate(stats: &Statistics) -> f64 {
    if stats.view_count == 0 {
        return 0.0;
    }
    let interactions = stats.like_count.saturating_add(stats.comment_count) as f64;
    round_to(interactions / stats.view_count as f64 * 100.0, 2)
}

pub fn derive_item(item: &Item) -> DerivedItem<'_> {
    let duration_seconds = parse_iso8601_duration(&item.duration);
    let published = parse_published_time(&item.published_at);
    if published.is_none() {
        tracing::warn!(id = %item.id, published_at = %item.published_at, "could not parse publish date");
    }
    DerivedItem {
        item,
        engagement_rate: engagement_rate(&item.statistics),
        duration_seconds,
        published,
        format: classify(duration_seconds, &item.title, &item.description),
    }
}

/// Derives every item, preserving input order.
pub fn derive_items(items: &[Item]) -> Vec<DerivedItem<'_>> {
    items.iter().map(derive_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(views: u64, likes: u64, comments: u64) -> Statistics {
        Statistics {
            view_count: views,
            like_count: likes,
            comment_count: comments,
        }
    }

    #[test]
    fn engagement_formula() {
        assert_eq!(engagement_rate(&stats(1000, 40, 10)), 5.0);
        assert_eq!(engagement_rate(&stats(3, 1, 0)), 33.33);
    }

    #[test]
    fn engagement_without_views_is_zero() {
        assert_eq!(engagement_rate(&stats(0, 40, 10)), 0.0);
    }

    #[test]
    fn derive_item_fills_all_fields() {
        let item = Item {
            id: "v1".into(),
            title: "Deep dive".into(),
            duration: "PT5M20S".into(),
            published_at: "2025-01-10T10:00:00Z".into(),
            statistics: stats(5000, 300, 40),
            ..Default::default()
        };
        let derived = derive_item(&item);
        assert_eq!(derived.duration_seconds, 320);
        assert_eq!(derived.engagement_rate, 6.8);
        assert_eq!(derived.format, Format::LongForm);
        assert!(derived.published.is_some());
        assert_eq!(derived.views(), 5000);
    }

    #[test]
    fn bad_fields_degrade() {
        let item = Item {
            id: "v2".into(),
            title: "x".into(),
            duration: "garbage".into(),
            published_at: "soon".into(),
            ..Default::default()
        };
        let derived = derive_item(&item);
        assert_eq!(derived.duration_seconds, 0);
        assert!(derived.published.is_none());
        assert!(derived.is_short());
    }
}

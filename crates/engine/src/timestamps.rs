// ABOUTME: Timestamp coverage audit over long-form items longer than two minutes.
// ABOUTME: Lists every eligible item without chapter timestamps, most-viewed first.

use serde::Serialize;

use crate::derive::DerivedItem;
use crate::finding::Priority;
use crate::stats::{percent, round_to};
use crate::text::{char_len, has_timestamp};

/// Long-form items must run longer than this to need chapters.
pub const MIN_ELIGIBLE_SECONDS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingTimestampRow {
    pub video_id: String,
    pub video_url: String,
    pub title: String,
    pub duration_seconds: u64,
    pub duration_minutes: f64,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub views: u64,
    pub description_length: usize,
    pub priority: Priority,
    pub has_timestamps: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampAudit {
    pub eligible_count: usize,
    pub with_timestamps_count: usize,
    pub missing_count: usize,
    pub coverage_percent: f64,
    pub missing_videos: Vec<MissingTimestampRow>,
}

pub fn is_eligible(item: &DerivedItem<'_>) -> bool {
    !item.is_short() && item.duration_seconds > MIN_ELIGIBLE_SECONDS
}

/// Audits `long_form` items. The top quarter of missing rows (at least
/// one) by views is High, the rest Medium.
pub fn audit_timestamps(long_form: &[&DerivedItem<'_>], video_url_base: &str) -> TimestampAudit {
    let eligible: Vec<&DerivedItem<'_>> = long_form.iter().copied().filter(|d| is_eligible(d)).collect();
    let (with, mut missing): (Vec<&DerivedItem<'_>>, Vec<&DerivedItem<'_>>) = eligible
        .iter()
        .copied()
        .partition(|d| has_timestamp(&d.item.description));
    missing.sort_by(|a, b| b.views().cmp(&a.views()));

    let high_cutoff = missing.len().div_ceil(4).max(1);
    let missing_videos: Vec<MissingTimestampRow> = missing
        .iter()
        .enumerate()
        .map(|(idx, d)| MissingTimestampRow {
            video_id: d.item.id.clone(),
            video_url: format!("{}{}", video_url_base, d.item.id),
            title: d.item.title.clone(),
            duration_seconds: d.duration_seconds,
            duration_minutes: round_to(d.duration_seconds as f64 / 60.0, 2),
            published_at: d.item.published_at.clone(),
            views: d.views(),
            description_length: char_len(&d.item.description),
            priority: if idx < high_cutoff {
                Priority::High
            } else {
                Priority::Medium
            },
            has_timestamps: "No",
        })
        .collect();

    TimestampAudit {
        eligible_count: eligible.len(),
        with_timestamps_count: with.len(),
        missing_count: missing_videos.len(),
        coverage_percent: round_to(percent(with.len(), eligible.len()), 1),
        missing_videos,
    }
}

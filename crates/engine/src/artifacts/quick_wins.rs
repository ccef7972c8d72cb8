// ABOUTME: Quick wins naming the exact items that need a small metadata fix.
// ABOUTME: Fixed rule scans, each capped, then ordered by priority and views.

use serde::Serialize;

use super::{SHORT_DESCRIPTION_CHARS, TITLE_MAX_CHARS};
use crate::derive::DerivedItem;
use crate::finding::Priority;
use crate::modules::AuditContext;
use crate::stats::median;
use crate::text::{char_len, has_timestamp, truncate_chars, words, TAG_STOP_WORDS};
use crate::timestamps::is_eligible;

const ZERO_TAG_CAP: usize = 5;
const SHORT_DESCRIPTION_CAP: usize = 3;
const TIMESTAMP_CAP: usize = 3;
const LONG_TITLE_CAP: usize = 2;
const TIMESTAMP_SCAN_TOP: usize = 10;
const SUGGESTED_TAGS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickWin {
    pub priority: Priority,
    pub action: String,
    pub video_id: String,
    pub video_title: String,
    pub video_url: String,
    pub views: u64,
    pub current_state: String,
    pub suggested_fix: String,
    pub impact: String,
    pub effort: String,
}

impl QuickWin {
    fn new(ctx: &AuditContext<'_>, d: &DerivedItem<'_>, priority: Priority, action: &str) -> Self {
        Self {
            priority,
            action: action.to_string(),
            video_id: d.item.id.clone(),
            video_title: d.item.title.clone(),
            video_url: ctx.video_url(&d.item.id),
            views: d.views(),
            current_state: String::new(),
            suggested_fix: String::new(),
            impact: String::new(),
            effort: String::new(),
        }
    }

    fn detail(mut self, current_state: String, suggested_fix: String, impact: &str, effort: &str) -> Self {
        self.current_state = current_state;
        self.suggested_fix = suggested_fix;
        self.impact = impact.to_string();
        self.effort = effort.to_string();
        self
    }
}

/// Builds at most `limit` quick wins.
pub fn quick_wins(ctx: &AuditContext<'_>, limit: usize) -> Vec<QuickWin> {
    let mut wins = Vec::new();

    for d in ctx.items.iter().filter(|d| d.item.tags.is_empty()).take(ZERO_TAG_CAP) {
        let suggested: Vec<String> = words(&d.item.title, TAG_STOP_WORDS)
            .into_iter()
            .take(SUGGESTED_TAGS)
            .collect();
        wins.push(QuickWin::new(ctx, d, Priority::High, "Add Tags").detail(
            "0 tags".to_string(),
            format!("Add these tags: {}", suggested.join(", ")),
            "Immediate discoverability improvement",
            "Low (2 minutes)",
        ));
    }

    let views: Vec<f64> = ctx.items.iter().map(|d| d.views() as f64).collect();
    let median_views = median(&views);
    for d in ctx
        .items
        .iter()
        .filter(|d| char_len(&d.item.description) < SHORT_DESCRIPTION_CHARS)
        .filter(|d| d.views() as f64 > median_views)
        .take(SHORT_DESCRIPTION_CAP)
    {
        wins.push(QuickWin::new(ctx, d, Priority::High, "Expand Description").detail(
            format!("{} characters", char_len(&d.item.description)),
            "Write 300-500 char description with keywords in first 150 chars".to_string(),
            "Better search ranking and context",
            "Medium (5-10 minutes)",
        ));
    }

    let mut by_views: Vec<&DerivedItem<'_>> = ctx.items.iter().collect();
    by_views.sort_by(|a, b| b.views().cmp(&a.views()));
    for d in by_views
        .into_iter()
        .take(TIMESTAMP_SCAN_TOP)
        .filter(|d| is_eligible(d) && !has_timestamp(&d.item.description))
        .take(TIMESTAMP_CAP)
    {
        wins.push(QuickWin::new(ctx, d, Priority::Medium, "Add Timestamps").detail(
            format!("No timestamps ({}min video)", d.duration_seconds / 60),
            "Add chapter timestamps (e.g., 0:00 Intro, 1:23 Main Content)".to_string(),
            "Improved viewer experience, better retention",
            "Low (3-5 minutes)",
        ));
    }

    for d in ctx
        .items
        .iter()
        .filter(|d| char_len(&d.item.title) > TITLE_MAX_CHARS)
        .take(LONG_TITLE_CAP)
    {
        let shortened = format!("{}...", truncate_chars(&d.item.title, 67));
        wins.push(QuickWin::new(ctx, d, Priority::Medium, "Shorten Title").detail(
            format!("{} characters (truncated in search)", char_len(&d.item.title)),
            format!("Shorten to ~60 chars: \"{}\"", shortened),
            "Full title visible in search results",
            "Low (2 minutes)",
        ));
    }

    wins.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| b.views.cmp(&a.views))
    });
    wins.truncate(limit);
    wins
}

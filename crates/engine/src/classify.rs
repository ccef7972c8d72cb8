// ABOUTME: Short-form versus long-form classification.
// ABOUTME: Hybrid rule on duration plus the #shorts marker; split keeps catalog order.

use serde::{Deserialize, Serialize};

use crate::derive::DerivedItem;
use crate::text::has_shorts_marker;

/// Items at or under this length are always short-form.
pub const SHORT_MAX_SECONDS: u64 = 60;

/// Items up to this length are short-form when they carry the `#shorts` marker.
pub const MARKED_SHORT_MAX_SECONDS: u64 = 180;

/// The two mutually exclusive item categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Short,
    LongForm,
}

/// Classifies one item.
///
/// 1. `duration <= 60` is Short.
/// 2. `duration <= 180` with a `#shorts` token in title or description is Short.
/// 3. Anything else is LongForm.
pub fn classify(duration_seconds: u64, title: &str, description: &str) -> Format {
    if duration_seconds <= SHORT_MAX_SECONDS {
        return Format::Short;
    }
    if duration_seconds <= MARKED_SHORT_MAX_SECONDS && has_shorts_marker(title, description) {
        return Format::Short;
    }
    Format::LongForm
}

/// Partitions items into (shorts, long-form), each in catalog order.
pub fn split<'i, 'a>(items: &'i [DerivedItem<'a>]) -> (Vec<&'i DerivedItem<'a>>, Vec<&'i DerivedItem<'a>>) {
    items.iter().partition(|item| item.format == Format::Short)
}

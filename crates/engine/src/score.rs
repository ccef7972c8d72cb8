// ABOUTME: Composite health scores derived from finding priority counts.
// ABOUTME: Channel and Shorts scores use separate weights and are never blended.

use crate::finding::{Finding, Priority};

pub const SCORE_FLOOR: i64 = 10;
pub const SCORE_CEILING: i64 = 100;

/// Number of findings at each priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub informational: usize,
}

impl PriorityCounts {
    pub fn tally<'a, I>(findings: I) -> Self
    where
        I: IntoIterator<Item = &'a Finding>,
    {
        let mut counts = Self::default();
        for finding in findings {
            match finding.priority {
                Priority::High => counts.high += 1,
                Priority::Medium => counts.medium += 1,
                Priority::Low => counts.low += 1,
                Priority::Informational => counts.informational += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low + self.informational
    }
}

fn clamp_score(deductions: i64) -> u8 {
    (SCORE_CEILING - deductions).clamp(SCORE_FLOOR, SCORE_CEILING) as u8
}

/// `100 - 10*High - 5*Medium`, clamped to [10, 100].
pub fn channel_score(counts: PriorityCounts) -> u8 {
    clamp_score(10 * counts.high as i64 + 5 * counts.medium as i64)
}

/// `100 - 12*High - 6*Medium - 2*Low`, clamped to [10, 100].
pub fn shorts_score(counts: PriorityCounts) -> u8 {
    clamp_score(12 * counts.high as i64 + 6 * counts.medium as i64 + 2 * counts.low as i64)
}

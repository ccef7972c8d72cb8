// ABOUTME: Configuration options for the auditor including AuditOptions and AuditorBuilder.
// ABOUTME: AuditorBuilder provides a fluent API for constructing Auditor instances with custom settings.

use std::sync::Arc;

use crate::auditor::Auditor;
use crate::clock::{Clock, SystemClock};

pub const DEFAULT_VIDEO_URL_BASE: &str = "https://youtube.com/watch?v=";
pub const DEFAULT_QUICK_WIN_LIMIT: usize = 10;
pub const DEFAULT_MINUTES_PER_FIX: u32 = 3;

/// Configuration options for an audit run.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Maximum number of quick wins reported.
    pub quick_win_limit: usize,
    /// Minutes assumed per optimization opportunity in the checklist estimate.
    pub minutes_per_fix: u32,
    pub video_url_base: String,
    /// Source of "now" for recency metrics.
    pub clock: Arc<dyn Clock>,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            quick_win_limit: DEFAULT_QUICK_WIN_LIMIT,
            minutes_per_fix: DEFAULT_MINUTES_PER_FIX,
            video_url_base: DEFAULT_VIDEO_URL_BASE.to_string(),
            clock: Arc::new(SystemClock),
        }
    }
}

/// Builder for constructing Auditor instances with custom configuration.
#[derive(Debug, Clone)]
pub struct AuditorBuilder {
    opts: AuditOptions,
}

impl AuditorBuilder {
    /// Create a new AuditorBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: AuditOptions::default(),
        }
    }

    /// Use a specific clock, e.g. a `FixedClock` for reproducible output.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.opts.clock = Arc::new(clock);
        self
    }

    /// Cap the number of quick wins.
    pub fn quick_win_limit(mut self, limit: usize) -> Self {
        self.opts.quick_win_limit = limit;
        self
    }

    /// Minutes per fix used for the checklist's time estimate.
    pub fn minutes_per_fix(mut self, minutes: u32) -> Self {
        self.opts.minutes_per_fix = minutes;
        self
    }

    /// Prefix for generated watch URLs.
    pub fn video_url_base(mut self, base: impl Into<String>) -> Self {
        self.opts.video_url_base = base.into();
        self
    }

    /// Build the Auditor with the configured options.
    pub fn build(self) -> Auditor {
        Auditor::new(self.opts)
    }
}

impl Default for AuditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    #[test]
    fn defaults() {
        let opts = AuditOptions::default();
        assert_eq!(opts.quick_win_limit, 10);
        assert_eq!(opts.minutes_per_fix, 3);
        assert_eq!(opts.video_url_base, "https://youtube.com/watch?v=");
    }

    #[test]
    fn builder_overrides() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let auditor = AuditorBuilder::new()
            .clock(FixedClock::new(now))
            .quick_win_limit(4)
            .minutes_per_fix(5)
            .video_url_base("https://youtu.be/")
            .build();
        let opts = auditor.options();
        assert_eq!(opts.quick_win_limit, 4);
        assert_eq!(opts.minutes_per_fix, 5);
        assert_eq!(opts.video_url_base, "https://youtu.be/");
        assert_eq!(opts.clock.now(), now);
    }
}

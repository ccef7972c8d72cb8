// ABOUTME: The analysis-module contract and the built-in module set.
// ABOUTME: Each module maps an AuditContext to typed metrics plus findings; the aggregator only sees scopes.

pub mod engagement;
pub mod schedule;
pub mod shorts;
pub mod tags;
pub mod titles;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::split;
use crate::derive::DerivedItem;
use crate::finding::Finding;
use crate::models::Channel;
use crate::options::DEFAULT_VIDEO_URL_BASE;

pub use engagement::{EngagementMetrics, EngagementModule};
pub use schedule::{ScheduleMetrics, ScheduleModule};
pub use shorts::{ShortsMetrics, ShortsModule};
pub use tags::{TagMetrics, TagsModule};
pub use titles::{TitleMetrics, TitlesModule};

/// Which composite score a module's findings count towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreScope {
    Channel,
    Shorts,
}

/// Everything a module may read during one run.
#[derive(Debug, Clone)]
pub struct AuditContext<'a> {
    pub channel: &'a Channel,
    pub items: &'a [DerivedItem<'a>],
    pub shorts: Vec<&'a DerivedItem<'a>>,
    pub long_form: Vec<&'a DerivedItem<'a>>,
    pub now: DateTime<Utc>,
    /// Prefix joined with an item id to form its watch URL.
    pub video_url_base: &'a str,
}

impl<'a> AuditContext<'a> {
    pub fn new(channel: &'a Channel, items: &'a [DerivedItem<'a>], now: DateTime<Utc>) -> Self {
        let (shorts, long_form) = split(items);
        Self {
            channel,
            items,
            shorts,
            long_form,
            now,
            video_url_base: DEFAULT_VIDEO_URL_BASE,
        }
    }

    pub fn with_video_url_base(mut self, base: &'a str) -> Self {
        self.video_url_base = base;
        self
    }

    pub fn video_url(&self, id: &str) -> String {
        format!("{}{}", self.video_url_base, id)
    }
}

/// Typed metrics of the built-in modules, serialised without a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleMetrics {
    Titles(TitleMetrics),
    Tags(TagMetrics),
    Engagement(EngagementMetrics),
    Schedule(ScheduleMetrics),
    Shorts(ShortsMetrics),
}

/// Output of one module: its metrics with the findings it raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleResult {
    #[serde(skip)]
    pub key: &'static str,
    #[serde(flatten)]
    pub metrics: ModuleMetrics,
    pub recommendations: Vec<Finding>,
}

/// An independent analysis over the catalog.
pub trait AnalysisModule {
    /// Key of this module in the output's `analysisModules` map.
    fn key(&self) -> &'static str;

    fn scope(&self) -> ScoreScope {
        ScoreScope::Channel
    }

    fn analyze(&self, ctx: &AuditContext<'_>) -> ModuleResult;
}

/// The built-in modules in reporting order.
pub fn default_modules() -> Vec<Box<dyn AnalysisModule>> {
    vec![
        Box::new(TitlesModule),
        Box::new(TagsModule),
        Box::new(EngagementModule),
        Box::new(ScheduleModule),
        Box::new(ShortsModule),
    ]
}

// ABOUTME: Channel audit engine for tubeaudit.
// ABOUTME: Derives per-item metrics, runs the analysis modules, scores findings and builds artifacts.

pub mod artifacts;
pub mod auditor;
pub mod classify;
pub mod clock;
pub mod derive;
pub mod duration_parse;
pub mod error;
pub mod finding;
pub mod models;
pub mod modules;
pub mod options;
pub mod parser;
pub mod report;
pub mod score;
pub mod stats;
pub mod text;
pub mod time_parse;
pub mod timestamps;

pub use artifacts::{AuditChecklist, BeforeAfterExample, QuickWin};
pub use auditor::{analyze, Auditor};
pub use classify::{classify, split, Format};
pub use clock::{Clock, FixedClock, SystemClock};
pub use derive::{derive_item, derive_items, engagement_rate, DerivedItem};
pub use duration_parse::parse_iso8601_duration;
pub use error::AuditError;
pub use finding::{Benchmark, Finding, FindingRule, Priority};
pub use models::{Channel, InputDocument, Item, Statistics};
pub use modules::{AnalysisModule, AuditContext, ModuleMetrics, ModuleResult, ScoreScope};
pub use options::{AuditOptions, AuditorBuilder};
pub use parser::parse_input_bytes;
pub use report::{AnalysisReport, ReportSummary};
pub use score::{channel_score, shorts_score, PriorityCounts};
pub use time_parse::parse_published_time;
pub use timestamps::{audit_timestamps, TimestampAudit};

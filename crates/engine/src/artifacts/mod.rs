// ABOUTME: Actionable artifacts built alongside the module findings.
// ABOUTME: Quick wins, before/after exemplars and the issue-count checklist.

pub mod before_after;
pub mod checklist;
pub mod quick_wins;

pub use before_after::{before_after_examples, BeforeAfterExample};
pub use checklist::{audit_checklist, AuditChecklist, ChecklistSummary};
pub use quick_wins::{quick_wins, QuickWin};

/// Titles longer than this are truncated in search results.
pub const TITLE_MAX_CHARS: usize = 70;
pub const TITLE_MIN_CHARS: usize = 40;
pub const SHORT_DESCRIPTION_CHARS: usize = 100;
pub const OPTIMAL_DESCRIPTION_CHARS: usize = 300;

// ABOUTME: Finding records, priorities and the declarative threshold-rule tables.
// ABOUTME: Modules declare ordered (predicate, builder) pairs; evaluate() fires them in order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Priority of a finding. `rank()` drives every priority sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
    Informational,
}

impl Priority {
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
            Priority::Informational => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Informational => "Informational",
        };
        write!(f, "{}", s)
    }
}

/// One rule-triggered diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub priority: Priority,
    pub category: String,
    pub issue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    pub recommendation: String,
    pub impact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Finding {
    pub fn new(
        priority: Priority,
        category: impl Into<String>,
        issue: impl Into<String>,
        recommendation: impl Into<String>,
        impact: impl Into<String>,
    ) -> Self {
        Self {
            priority,
            category: category.into(),
            issue: issue.into(),
            benchmark: None,
            why: None,
            formula: None,
            recommendation: recommendation.into(),
            impact: impact.into(),
            source: None,
        }
    }

    /// Attaches benchmark text, rationale and citation in one go.
    pub fn cited(mut self, reference: &Benchmark) -> Self {
        self.benchmark = Some(reference.benchmark.to_string());
        self.why = Some(reference.why.to_string());
        self.source = Some(reference.source.to_string());
        self
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }
}

/// Reference text behind a benchmark-backed finding.
#[derive(Debug, Clone, Copy)]
pub struct Benchmark {
    pub benchmark: &'static str,
    pub why: &'static str,
    pub source: &'static str,
}

/// One row of a module's threshold table.
pub struct FindingRule<M> {
    pub name: &'static str,
    pub when: fn(&M) -> bool,
    pub build: fn(&M) -> Finding,
}

/// Fires every matching rule in declaration order.
pub fn evaluate<M>(rules: &[FindingRule<M>], metrics: &M) -> Vec<Finding> {
    rules
        .iter()
        .filter(|rule| (rule.when)(metrics))
        .map(|rule| {
            tracing::trace!(rule = rule.name, "rule fired");
            (rule.build)(metrics)
        })
        .collect()
}

/// Stable sort by priority rank; equal priorities keep module order.
pub fn sort_by_priority(findings: &mut [Finding]) {
    findings.sort_by_key(|f| f.priority.rank());
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        value: u32,
    }

    const RULES: &[FindingRule<Sample>] = &[
        FindingRule {
            name: "big",
            when: |m| m.value > 10,
            build: |m| Finding::new(Priority::Medium, "Test", format!("big {}", m.value), "shrink", "less"),
        },
        FindingRule {
            name: "any",
            when: |_| true,
            build: |_| Finding::new(Priority::High, "Test", "always", "none", "none"),
        },
    ];

    #[test]
    fn evaluates_in_declaration_order() {
        let fired = evaluate(RULES, &Sample { value: 12 });
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0].issue, "big 12");
        assert_eq!(fired[1].issue, "always");

        let fired = evaluate(RULES, &Sample { value: 3 });
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].priority, Priority::High);
    }

    #[test]
    fn priority_sort_is_stable() {
        let mut findings = vec![
            Finding::new(Priority::Low, "A", "low", "", ""),
            Finding::new(Priority::High, "A", "high-1", "", ""),
            Finding::new(Priority::Informational, "A", "info", "", ""),
            Finding::new(Priority::High, "A", "high-2", "", ""),
        ];
        sort_by_priority(&mut findings);
        let issues: Vec<&str> = findings.iter().map(|f| f.issue.as_str()).collect();
        assert_eq!(issues, vec!["high-1", "high-2", "low", "info"]);
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let json = serde_json::to_value(Finding::new(Priority::Low, "Tags", "i", "r", "m")).unwrap();
        assert!(json.get("benchmark").is_none());
        assert_eq!(json["priority"], "Low");
    }
}

//! Shared data models for rules, findings, and reports.

pub mod request;
pub mod rule;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Severity attached to a rule and every finding it produces.
pub enum Severity {
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single rule match with its rendered message and location.
pub struct Finding {
    pub rule: String,
    pub severity: Severity,
    pub message: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    /// Byte offset of the match within the source unit.
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Pass/fail state of one catalog rule for an invocation.
pub struct RuleOutcome {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub count: usize,
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Aggregated counts used by printers and exit codes.
pub struct Summary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub files: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Report container: ordered findings, per-rule outcomes, and the summary.
pub struct Report {
    pub passed: bool,
    pub findings: Vec<Finding>,
    pub rules: Vec<RuleOutcome>,
    pub summary: Summary,
}

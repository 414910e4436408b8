//! Rule schema used by the catalog and scanner.
//!
//! A rule is pure data: an id, a display name, a severity, a message template,
//! and a `RuleCheck` describing how matches are detected. Templates may
//! reference `{placeholders}` that the detector fills in (for example `{size}`
//! or `{min}`); unknown placeholders are left as written.

use super::Severity;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// A named, severity-tagged detection rule.
pub struct Rule {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub message: String,
    pub check: RuleCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Detection strategies supported by the scanner.
pub enum RuleCheck {
    /// Every non-overlapping regex match is a finding. Named capture groups
    /// become template placeholders.
    Pattern { pattern: String },
    /// `.frame(...)` directives with a literal `width:`/`height:` below `min`.
    FrameBelowMinimum { min: f64 },
    /// `.frame(...)` directives whose literal `width:`/`height:` values are all
    /// at or above `min`.
    FixedFrame { min: f64 },
    /// Postfix `!` after an identifier, `)` or `]`; skips `!=`, `try!`, and
    /// anything after `//` on the same line.
    ForceUnwrap,
    /// One finding per `subject` match when `companion` matches nowhere in the
    /// unit.
    MissingCompanion { subject: String, companion: String },
    /// A `control` whose body matches `content`, has no `title`, and carries no
    /// `label` in its body or trailing modifier chain.
    UnlabeledControl {
        control: String,
        content: String,
        title: String,
        label: String,
    },
}

impl RuleCheck {
    pub fn kind(&self) -> &'static str {
        match self {
            RuleCheck::Pattern { .. } => "pattern",
            RuleCheck::FrameBelowMinimum { .. } => "frame_below_minimum",
            RuleCheck::FixedFrame { .. } => "fixed_frame",
            RuleCheck::ForceUnwrap => "force_unwrap",
            RuleCheck::MissingCompanion { .. } => "missing_companion",
            RuleCheck::UnlabeledControl { .. } => "unlabeled_control",
        }
    }
}

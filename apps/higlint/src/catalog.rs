//! Rule catalog: the built-in ordered rule set and its compiled form.
//!
//! The catalog is an explicit value handed to the scanner, never global
//! state, so callers and tests can supply their own rules. Compilation
//! validates every pattern up front; a rule that fails to compile aborts the
//! whole catalog rather than being skipped.

use crate::checks::{FORCE_UNWRAP_PATTERN, FRAME_DIMENSION_PATTERN, FRAME_PATTERN};
use crate::config::RuleOverride;
use crate::error::RuleEvaluationError;
use crate::models::rule::{Rule, RuleCheck};
use crate::models::Severity;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Minimum touch target in points per the HIG.
pub const DEFAULT_MIN_TOUCH_TARGET: f64 = 44.0;

/// Built-in catalog with the default 44pt touch target.
pub fn all_rules() -> Vec<Rule> {
    builtin_rules(DEFAULT_MIN_TOUCH_TARGET)
}

/// Built-in catalog, in declaration order, with a custom touch target.
pub fn builtin_rules(min_touch_target: f64) -> Vec<Rule> {
    vec![
        Rule {
            id: "touch_target_too_small".into(),
            name: "Fixed-size frame below minimum".into(),
            severity: Severity::Error,
            message: "Touch target {dimension} is {size}pt, which is below the minimum {min}pt. \
                      Use .frame(minWidth: {min}, minHeight: {min}) or add .contentShape(Rectangle())."
                .into(),
            check: RuleCheck::FrameBelowMinimum {
                min: min_touch_target,
            },
        },
        Rule {
            id: "hardcoded_frame_size".into(),
            name: "Hardcoded frame size".into(),
            severity: Severity::Warning,
            message: "Hardcoded frame {dimension}: {size}pt. \
                      Consider using minWidth/minHeight or semantic tokens."
                .into(),
            check: RuleCheck::FixedFrame {
                min: min_touch_target,
            },
        },
        Rule {
            id: "hardcoded_color".into(),
            name: "Literal color value".into(),
            severity: Severity::Warning,
            message: "Hardcoded RGB/HSB color. Use semantic colors (e.g., .primary, \
                      .systemBackground) or Asset Catalog colors."
                .into(),
            check: RuleCheck::Pattern {
                pattern: r"\b(?:UI|NS)?Color\(\s*(?:\.(?:sRGB|sRGBLinear|displayP3)\s*,\s*)?(?:red|hue)\s*:\s*[\d.]+"
                    .into(),
            },
        },
        Rule {
            id: "hardcoded_font_size".into(),
            name: "Literal text size".into(),
            severity: Severity::Warning,
            message: "Hardcoded font size: {size}pt. Use semantic text styles (e.g., .body, \
                      .headline) for Dynamic Type support."
                .into(),
            check: RuleCheck::Pattern {
                pattern: r"(?:\.font\(\s*(?:Font)?\.system\(\s*size|\bUIFont\.systemFont\(\s*ofSize)\s*:\s*(?P<size>\d+(?:\.\d+)?)"
                    .into(),
            },
        },
        Rule {
            id: "force_unwrap".into(),
            name: "Force unwrap".into(),
            severity: Severity::Error,
            message: "Force unwrapping (!) can cause crashes. Use optional binding (if let, \
                      guard let) or nil coalescing (??) instead."
                .into(),
            check: RuleCheck::ForceUnwrap,
        },
        Rule {
            id: "missing_viewmodel_state".into(),
            name: "Missing ViewModel state enum".into(),
            severity: Severity::Warning,
            message: "{name} should expose a State enum (e.g., idle, loading, content, error) \
                      for state management."
                .into(),
            check: RuleCheck::MissingCompanion {
                subject: r"\bclass\s+(?P<name>\w+ViewModel)\b".into(),
                companion: r"\benum\s+State\b".into(),
            },
        },
        Rule {
            id: "missing_accessibility_label".into(),
            name: "Missing accessibility label".into(),
            severity: Severity::Warning,
            message: "Image-only button should have .accessibilityLabel() for VoiceOver support."
                .into(),
            check: RuleCheck::UnlabeledControl {
                control: r"\bButton\s*[({]".into(),
                content: r"\bImage\s*\(".into(),
                title: r#"^Button\s*\(\s*"|\bText\s*\(|\bLabel\s*\("#.into(),
                label: r"\.accessibilityLabel\s*\(".into(),
            },
        },
    ]
}

/// Apply per-rule config overrides: drop disabled rules and replace
/// severities. Ids that match no rule are logged and ignored.
pub fn apply_overrides(rules: Vec<Rule>, overrides: &HashMap<String, RuleOverride>) -> Vec<Rule> {
    let known: HashSet<&str> = rules.iter().map(|r| r.id.as_str()).collect();
    for id in overrides.keys() {
        if !known.contains(id.as_str()) {
            tracing::warn!(rule = %id, "ignoring override for unknown rule");
        }
    }
    rules
        .into_iter()
        .filter_map(|mut rule| {
            if let Some(ov) = overrides.get(&rule.id) {
                if ov.enabled == Some(false) {
                    tracing::debug!(rule = %rule.id, "rule disabled by config");
                    return None;
                }
                if let Some(sev) = ov.severity {
                    rule.severity = sev;
                }
            }
            Some(rule)
        })
        .collect()
}

/// Compiled detector for one rule.
#[derive(Debug)]
pub(crate) enum Detector {
    Pattern(Regex),
    Frame {
        frame: Regex,
        dimension: Regex,
        min: f64,
        below: bool,
    },
    ForceUnwrap(Regex),
    MissingCompanion {
        subject: Regex,
        companion: Regex,
    },
    UnlabeledControl {
        control: Regex,
        content: Regex,
        title: Regex,
        label: Regex,
    },
}

#[derive(Debug)]
pub(crate) struct CompiledRule {
    pub rule: Rule,
    pub detector: Detector,
}

/// Ordered, compiled rule set shared read-only by every scan.
#[derive(Debug)]
pub struct Catalog {
    rules: Vec<CompiledRule>,
}

impl Catalog {
    /// Compile `rules` in order. Fails on the first invalid pattern,
    /// threshold, or duplicated id.
    pub fn compile(rules: Vec<Rule>) -> Result<Self, RuleEvaluationError> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(rules.len());
        for rule in rules {
            if !seen.insert(rule.id.clone()) {
                return Err(RuleEvaluationError::DuplicateId(rule.id));
            }
            let detector = compile_detector(&rule)?;
            out.push(CompiledRule { rule, detector });
        }
        tracing::debug!(rules = out.len(), "compiled rule catalog");
        Ok(Catalog { rules: out })
    }

    /// Compile the built-in rules for `min_touch_target` after applying the
    /// per-rule config overrides.
    pub fn builtin(
        min_touch_target: f64,
        overrides: &HashMap<String, RuleOverride>,
    ) -> Result<Self, RuleEvaluationError> {
        Self::compile(apply_overrides(builtin_rules(min_touch_target), overrides))
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(|c| &c.rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn compiled(&self) -> &[CompiledRule] {
        &self.rules
    }
}

fn compile_detector(rule: &Rule) -> Result<Detector, RuleEvaluationError> {
    let re = |pattern: &str| compile_pattern(&rule.id, pattern);
    Ok(match &rule.check {
        RuleCheck::Pattern { pattern } => Detector::Pattern(re(pattern)?),
        RuleCheck::FrameBelowMinimum { min } => Detector::Frame {
            frame: re(FRAME_PATTERN)?,
            dimension: re(FRAME_DIMENSION_PATTERN)?,
            min: check_threshold(&rule.id, *min)?,
            below: true,
        },
        RuleCheck::FixedFrame { min } => Detector::Frame {
            frame: re(FRAME_PATTERN)?,
            dimension: re(FRAME_DIMENSION_PATTERN)?,
            min: check_threshold(&rule.id, *min)?,
            below: false,
        },
        RuleCheck::ForceUnwrap => Detector::ForceUnwrap(re(FORCE_UNWRAP_PATTERN)?),
        RuleCheck::MissingCompanion { subject, companion } => Detector::MissingCompanion {
            subject: re(subject)?,
            companion: re(companion)?,
        },
        RuleCheck::UnlabeledControl {
            control,
            content,
            title,
            label,
        } => Detector::UnlabeledControl {
            control: re(control)?,
            content: re(content)?,
            title: re(title)?,
            label: re(label)?,
        },
    })
}

fn compile_pattern(rule_id: &str, pattern: &str) -> Result<Regex, RuleEvaluationError> {
    Regex::new(pattern).map_err(|e| RuleEvaluationError::InvalidPattern {
        rule_id: rule_id.to_string(),
        pattern: pattern.to_string(),
        source: e,
    })
}

fn check_threshold(rule_id: &str, min: f64) -> Result<f64, RuleEvaluationError> {
    if min.is_finite() && min > 0.0 {
        Ok(min)
    } else {
        Err(RuleEvaluationError::InvalidThreshold {
            rule_id: rule_id.to_string(),
            reason: format!("minimum must be a positive number, got {}", min),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_compiles_in_declared_order() {
        let cat = Catalog::compile(all_rules()).unwrap();
        let ids: Vec<&str> = cat.rules().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "touch_target_too_small",
                "hardcoded_frame_size",
                "hardcoded_color",
                "hardcoded_font_size",
                "force_unwrap",
                "missing_viewmodel_state",
                "missing_accessibility_label",
            ]
        );
        let unwrap = cat.rules().find(|r| r.id == "force_unwrap").unwrap();
        assert_eq!(unwrap.severity, Severity::Error);
    }

    #[test]
    fn test_invalid_pattern_aborts_compilation() {
        let mut rules = all_rules();
        rules.push(Rule {
            id: "broken".into(),
            name: "Broken".into(),
            severity: Severity::Warning,
            message: "never".into(),
            check: RuleCheck::Pattern {
                pattern: "(unclosed".into(),
            },
        });
        let err = Catalog::compile(rules).unwrap_err();
        assert!(matches!(
            err,
            RuleEvaluationError::InvalidPattern { ref rule_id, .. } if rule_id == "broken"
        ));
    }

    #[test]
    fn test_duplicate_id_and_bad_threshold_rejected() {
        let mut rules = all_rules();
        rules.push(rules[0].clone());
        assert!(matches!(
            Catalog::compile(rules),
            Err(RuleEvaluationError::DuplicateId(id)) if id == "touch_target_too_small"
        ));
        assert!(matches!(
            Catalog::builtin(0.0, &HashMap::new()),
            Err(RuleEvaluationError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_overrides_disable_and_reseverity() {
        let mut ov = HashMap::new();
        ov.insert(
            "force_unwrap".to_string(),
            RuleOverride {
                enabled: Some(false),
                severity: None,
            },
        );
        ov.insert(
            "hardcoded_color".to_string(),
            RuleOverride {
                enabled: None,
                severity: Some(Severity::Error),
            },
        );
        ov.insert("no_such_rule".to_string(), RuleOverride::default());
        let rules = apply_overrides(all_rules(), &ov);
        assert!(rules.iter().all(|r| r.id != "force_unwrap"));
        let color = rules.iter().find(|r| r.id == "hardcoded_color").unwrap();
        assert_eq!(color.severity, Severity::Error);
        assert_eq!(rules.len(), all_rules().len() - 1);
    }

    #[test]
    fn test_builtin_applies_overrides_and_threshold() {
        let mut ov = HashMap::new();
        for r in all_rules() {
            ov.insert(
                r.id,
                RuleOverride {
                    enabled: Some(false),
                    severity: None,
                },
            );
        }
        let cat = Catalog::builtin(48.0, &ov).unwrap();
        assert!(cat.is_empty());

        let cat = Catalog::builtin(48.0, &HashMap::new()).unwrap();
        assert_eq!(cat.len(), all_rules().len());
        assert!(cat.rules().any(|r| r.check == RuleCheck::FrameBelowMinimum { min: 48.0 }));
    }
}

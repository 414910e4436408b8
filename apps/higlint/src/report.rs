//! Reporter: turns findings into a structured `Report`.
//!
//! Presentation is handled by `output`; this module only counts.

use crate::catalog::Catalog;
use crate::models::{Finding, Report, RuleOutcome, Severity, Summary};

/// Summarize `findings` against the catalog that produced them.
///
/// Every catalog rule gets an outcome (in catalog order), and the report
/// fails when at least one error-severity finding is present.
pub fn summarize(findings: Vec<Finding>, catalog: &Catalog) -> Report {
    let rules = catalog
        .rules()
        .map(|rule| {
            let count = findings.iter().filter(|f| f.rule == rule.id).count();
            RuleOutcome {
                id: rule.id.clone(),
                name: rule.name.clone(),
                severity: rule.severity,
                count,
                passed: count == 0,
            }
        })
        .collect();
    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    let warnings = findings.len() - errors;
    let mut files: Vec<&str> = findings.iter().map(|f| f.file.as_str()).collect();
    files.sort_unstable();
    files.dedup();
    Report {
        passed: errors == 0,
        summary: Summary {
            total: findings.len(),
            errors,
            warnings,
            files: files.len(),
        },
        findings,
        rules,
    }
}

impl Report {
    /// Fold per-unit reports (already in the desired order) into one.
    /// `files` becomes the number of units scanned, not just those with
    /// findings.
    pub fn merge(parts: Vec<Report>, catalog: &Catalog) -> Report {
        let units = parts.len();
        let findings = parts.into_iter().flat_map(|r| r.findings).collect();
        let mut merged = summarize(findings, catalog);
        merged.summary.files = units;
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::all_rules;
    use crate::scan::{Scanner, SourceUnit};

    #[test]
    fn test_clean_text_passes_with_zero_findings() {
        let cat = Catalog::compile(all_rules()).unwrap();
        let findings = Scanner::new(&cat).scan(&SourceUnit::new(
            "ok.swift",
            "Text(\"Hello\").font(.body).foregroundStyle(.primary)",
        ));
        let report = summarize(findings, &cat);
        assert!(report.passed);
        assert!(report.findings.is_empty());
        assert_eq!(report.summary, Summary::default());
        assert_eq!(report.rules.len(), cat.len());
        assert!(report.rules.iter().all(|r| r.passed && r.count == 0));
    }

    #[test]
    fn test_errors_fail_and_warnings_do_not() {
        let cat = Catalog::compile(all_rules()).unwrap();
        let scanner = Scanner::new(&cat);
        let warn_only = summarize(
            scanner.scan(&SourceUnit::new("w.swift", "Color(red: 1, green: 1, blue: 1)")),
            &cat,
        );
        assert!(warn_only.passed);
        assert_eq!(warn_only.summary.warnings, 1);
        assert_eq!(warn_only.summary.errors, 0);

        let failing = summarize(
            scanner.scan(&SourceUnit::new("e.swift", "let a = b!\nColor(hue: 0.5, saturation: 1, brightness: 1)")),
            &cat,
        );
        assert!(!failing.passed);
        assert_eq!(failing.summary.errors, 1);
        assert_eq!(failing.summary.warnings, 1);
        assert_eq!(failing.summary.files, 1);
        let unwrap = failing.rules.iter().find(|r| r.id == "force_unwrap").unwrap();
        assert!(!unwrap.passed);
        assert_eq!(unwrap.count, 1);
    }

    #[test]
    fn test_merge_counts_every_unit() {
        let cat = Catalog::compile(all_rules()).unwrap();
        let scanner = Scanner::new(&cat);
        let a = summarize(scanner.scan(&SourceUnit::new("a.swift", "x!")), &cat);
        let b = summarize(scanner.scan(&SourceUnit::new("b.swift", "")), &cat);
        let merged = Report::merge(vec![a, b], &cat);
        assert_eq!(merged.summary.files, 2);
        assert_eq!(merged.summary.errors, 1);
        assert_eq!(merged.findings[0].file, "a.swift");
    }
}

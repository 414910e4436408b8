//! Output rendering for check, analyze, and rules commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON forms include
//! per-item fields, per-rule outcomes, and a top-level summary. Every report
//! carries `HEURISTIC_NOTE` so consumers know results come from a textual
//! scan.

use crate::catalog::Catalog;
use crate::models::{Report, Severity};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

pub const HEURISTIC_NOTE: &str = "Results are heuristic: source is scanned as text, so matches \
inside comments or string literals are reported like code.";

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn print_json(v: &JsonVal) {
    println!(
        "{}",
        serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
    );
}

/// Print a lint report in the requested format. `errors` lists units that
/// could not be scanned.
pub fn print_report(res: &Report, output: &str, errors: &[String]) {
    match output {
        "json" => {
            let mut out = compose_report_json(res);
            out["unscanned"] = json!(errors);
            print_json(&out);
        }
        _ => {
            let color = use_colors(output);
            for f in &res.findings {
                let (sev, icon) = match f.severity {
                    Severity::Error => ("⟦error⟧", "✖"),
                    Severity::Warning => ("⟦warn⟧", "▲"),
                };
                let loc = format!("{}:{}:{}", f.file, f.line, f.column);
                if color {
                    let (sev, icon) = match f.severity {
                        Severity::Error => (sev.red().bold().to_string(), icon.red().to_string()),
                        Severity::Warning => {
                            (sev.yellow().bold().to_string(), icon.yellow().to_string())
                        }
                    };
                    println!("{} {} {} ❲{}❳ — {}", icon, sev, loc.bold(), f.rule, f.message);
                } else {
                    println!("{} {} {} ❲{}❳ — {}", icon, sev, loc, f.rule, f.message);
                }
            }
            for e in errors {
                eprintln!("{} {}", crate::utils::error_prefix(), e);
            }
            let summary = format!(
                "— Summary — errors={} warnings={} files={} result={}",
                res.summary.errors,
                res.summary.warnings,
                res.summary.files,
                if res.passed { "pass" } else { "fail" }
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
            if !res.findings.is_empty() {
                eprintln!("{} {}", crate::utils::note_prefix(), HEURISTIC_NOTE);
            }
        }
    }
}

/// Compose the lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(res: &Report) -> JsonVal {
    json!({
        "passed": res.passed,
        "findings": res.findings,
        "rules": res.rules,
        "summary": res.summary,
        "note": HEURISTIC_NOTE,
    })
}

/// Compose the analyzer response for a single unit read from stdin.
pub fn compose_analyze_json(res: &Report) -> JsonVal {
    let violations: Vec<_> = res
        .findings
        .iter()
        .map(|f| {
            json!({
                "severity": f.severity,
                "rule": f.rule,
                "message": f.message,
                "line": f.line,
                "column": f.column,
            })
        })
        .collect();
    json!({
        "status": "success",
        "passed": res.passed,
        "violations": violations,
        "rules": res.rules,
        "summary": {
            "total": res.summary.total,
            "errors": res.summary.errors,
            "warnings": res.summary.warnings,
        },
        "note": HEURISTIC_NOTE,
    })
}

/// Compose the analyzer failure response.
pub fn compose_error_json(message: &str) -> JsonVal {
    json!({"status": "error", "message": message})
}

/// Print the analyzer response. Human output reuses the lint printer.
pub fn print_analyze(res: &Report, output: &str) {
    match output {
        "human" => print_report(res, output, &[]),
        _ => print_json(&compose_analyze_json(res)),
    }
}

pub fn print_analyze_error(message: &str) {
    print_json(&compose_error_json(message));
}

/// List the effective catalog.
pub fn print_rules(catalog: &Catalog, output: &str) {
    match output {
        "json" => {
            let rules: Vec<_> = catalog.rules().collect();
            print_json(&json!({ "rules": rules }));
        }
        _ => {
            if catalog.is_empty() {
                eprintln!("{} All rules are disabled.", crate::utils::note_prefix());
                return;
            }
            let color = use_colors(output);
            for r in catalog.rules() {
                let sev = format!("{:<7}", r.severity.as_str());
                if color {
                    let sev = match r.severity {
                        Severity::Error => sev.red().to_string(),
                        Severity::Warning => sev.yellow().to_string(),
                    };
                    println!("{} {} — {} ({})", sev, r.id.bold(), r.name, r.check.kind());
                } else {
                    println!("{} {} — {} ({})", sev, r.id, r.name, r.check.kind());
                }
            }
        }
    }
}

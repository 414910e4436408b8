//! Lint runner: expands targets under the repository root and scans them.
//!
//! Files are scanned in parallel with a shared read-only catalog. A file
//! that cannot be read or decoded is reported in the error list and skipped;
//! it never affects the findings of other files.

use crate::catalog::Catalog;
use crate::config::Effective;
use crate::models::Report;
use crate::report::summarize;
use crate::scan::Scanner;
use crate::utils;
use glob::{glob_with, MatchOptions, Pattern};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Run lint over `paths`, or over the configured patterns when `paths` is
/// empty.
///
/// Returns the merged report (findings sorted by file, then catalog order,
/// then occurrence) and any per-target errors.
pub fn run_lint(eff: &Effective, catalog: &Catalog, paths: &[String]) -> (Report, Vec<String>) {
    let mut errors = Vec::new();
    let targets = collect_targets(eff, paths, &mut errors);
    tracing::info!(files = targets.len(), rules = catalog.len(), "linting");

    let scanner = Scanner::new(catalog);
    let mut per_file: Vec<(String, Result<Report, String>)> = targets
        .par_iter()
        .map(|path| {
            let name = utils::rel_to(path, &eff.repo_root);
            let res = fs::read(path)
                .map_err(|e| format!("{}: {}", name, e))
                .and_then(|bytes| scanner.scan_bytes(&name, bytes).map_err(|e| e.to_string()))
                .map(|findings| summarize(findings, catalog));
            (name, res)
        })
        .collect();
    // Deterministic ordering by file path
    per_file.sort_by(|a, b| a.0.cmp(&b.0));

    let mut parts = Vec::with_capacity(per_file.len());
    for (_, res) in per_file {
        match res {
            Ok(report) => parts.push(report),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unit");
                errors.push(e);
            }
        }
    }
    let report = Report::merge(parts, catalog);
    tracing::info!(
        files = report.summary.files,
        errors = report.summary.errors,
        warnings = report.summary.warnings,
        "lint finished"
    );
    (report, errors)
}

fn match_options() -> MatchOptions {
    // Keep `**` out of hidden directories such as `.build` and `.git`
    MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    }
}

/// Expand explicit paths (files, directories, or globs) or the configured
/// patterns into a sorted, de-duplicated file list.
fn collect_targets(eff: &Effective, paths: &[String], errors: &mut Vec<String>) -> Vec<PathBuf> {
    let mut targets: BTreeSet<PathBuf> = BTreeSet::new();
    if paths.is_empty() {
        for pat in &eff.patterns {
            expand_glob(&rooted(&eff.repo_root, pat), &mut targets, errors);
        }
        return targets.into_iter().collect();
    }
    for p in paths {
        let path = Path::new(p);
        let path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if path.is_file() {
            targets.insert(path);
        } else if path.is_dir() {
            expand_glob(&rooted(&path, "**/*.swift"), &mut targets, errors);
        } else {
            let before = targets.len();
            expand_glob(p, &mut targets, errors);
            if targets.len() == before {
                errors.push(format!("{}: no such file or matching pattern", p));
            }
        }
    }
    targets.into_iter().collect()
}

/// Join a glob `pattern` onto `base`, escaping any glob syntax in `base`.
fn rooted(base: &Path, pattern: &str) -> String {
    let base = Pattern::escape(&base.to_string_lossy());
    format!("{}/{}", base.trim_end_matches('/'), pattern)
}

fn expand_glob(pattern: &str, targets: &mut BTreeSet<PathBuf>, errors: &mut Vec<String>) {
    match glob_with(pattern, match_options()) {
        Ok(entries) => {
            for entry in entries.flatten() {
                if entry.is_file() {
                    let entry = fs::canonicalize(&entry).unwrap_or(entry);
                    targets.insert(entry);
                }
            }
        }
        Err(e) => errors.push(format!("invalid pattern '{}': {}", pattern, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::all_rules;
    use crate::config::{resolve_effective, CliOverrides};
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, Catalog) {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("App/Views")).unwrap();
        fs::create_dir_all(root.join(".build")).unwrap();
        fs::write(
            root.join("App/Views/Close.swift"),
            "Button { dismiss() }.frame(width: 24, height: 24)\n",
        )
        .unwrap();
        fs::write(
            root.join("App/Theme.swift"),
            "let brand = Color(red: 0.1, green: 0.2, blue: 0.3)\n",
        )
        .unwrap();
        fs::write(root.join(".build/Gen.swift"), "let x = y!\n").unwrap();
        fs::write(root.join("README.md"), "value!").unwrap();
        (dir, Catalog::compile(all_rules()).unwrap())
    }

    #[test]
    fn test_default_patterns_skip_hidden_dirs_and_sort_by_file() {
        let (dir, cat) = setup();
        let eff = resolve_effective(&CliOverrides {
            repo_root: dir.path().to_str(),
            ..Default::default()
        })
        .unwrap();
        let (report, errors) = run_lint(&eff, &cat, &[]);
        assert!(errors.is_empty());
        assert_eq!(report.summary.files, 2);
        let files: Vec<&str> = report.findings.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(files, vec!["App/Theme.swift", "App/Views/Close.swift"]);
        assert!(!report.passed);
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.summary.warnings, 1);
    }

    #[test]
    fn test_undecodable_file_is_skipped_without_affecting_others() {
        let (dir, cat) = setup();
        fs::write(dir.path().join("App/Broken.swift"), [0xffu8, 0xfe, 0x00]).unwrap();
        let eff = resolve_effective(&CliOverrides {
            repo_root: dir.path().to_str(),
            ..Default::default()
        })
        .unwrap();
        let (report, errors) = run_lint(&eff, &cat, &[]);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("App/Broken.swift"));
        assert_eq!(report.summary.files, 2);
        assert_eq!(report.summary.total, 2);
    }

    #[test]
    fn test_explicit_paths_and_missing_targets() {
        let (dir, cat) = setup();
        let eff = resolve_effective(&CliOverrides {
            repo_root: dir.path().to_str(),
            ..Default::default()
        })
        .unwrap();
        let views = dir.path().join("App/Views").to_string_lossy().to_string();
        let missing = dir.path().join("Nope.swift").to_string_lossy().to_string();
        let (report, errors) = run_lint(&eff, &cat, &[views, missing]);
        assert_eq!(report.summary.files, 1);
        assert_eq!(report.findings[0].rule, "touch_target_too_small");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Nope.swift"));
    }
}

//! Scanner: applies a compiled catalog to one source unit.
//!
//! Results are heuristic. The scan is textual and does not parse Swift, so a
//! match inside a block comment or a string literal is reported like real
//! code. Callers surface this to users (see `output::HEURISTIC_NOTE`).
//!
//! Ordering: findings follow catalog declaration order, then left-to-right
//! occurrence within each rule. Scanning is pure, so identical text always
//! yields identical findings.

use crate::catalog::Catalog;
use crate::checks::{detect, render};
use crate::error::DecodeError;
use crate::models::Finding;

/// A named block of UTF-8 text submitted for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub name: String,
    pub text: String,
}

impl SourceUnit {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceUnit {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Decode raw bytes. Invalid UTF-8 is rejected outright; nothing is
    /// scanned from a unit that fails to decode.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, DecodeError> {
        let name = name.into();
        match String::from_utf8(bytes) {
            Ok(text) => Ok(SourceUnit { name, text }),
            Err(e) => Err(DecodeError {
                name,
                valid_up_to: e.utf8_error().valid_up_to(),
            }),
        }
    }
}

/// Maps byte offsets to 1-based line/column pairs.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        LineIndex { starts }
    }

    fn locate(&self, text: &str, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&s| s <= offset);
        let start = self.starts[line - 1];
        let column = text[start..offset].chars().count() + 1;
        (line, column)
    }
}

/// Applies every rule of a borrowed catalog to source units.
pub struct Scanner<'a> {
    catalog: &'a Catalog,
}

impl<'a> Scanner<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Scanner { catalog }
    }

    /// Scan one unit and return its findings in catalog, then occurrence,
    /// order.
    pub fn scan(&self, unit: &SourceUnit) -> Vec<Finding> {
        let index = LineIndex::new(&unit.text);
        let mut findings = Vec::new();
        for compiled in self.catalog.compiled() {
            let rule = &compiled.rule;
            let hits = detect(&compiled.detector, &unit.text);
            if !hits.is_empty() {
                tracing::trace!(unit = %unit.name, rule = %rule.id, hits = hits.len(), "rule matched");
            }
            for hit in hits {
                let (line, column) = index.locate(&unit.text, hit.offset);
                findings.push(Finding {
                    rule: rule.id.clone(),
                    severity: rule.severity,
                    message: render(&rule.message, &hit.vars),
                    file: unit.name.clone(),
                    line,
                    column,
                    offset: hit.offset,
                });
            }
        }
        tracing::debug!(unit = %unit.name, findings = findings.len(), "scanned unit");
        findings
    }

    /// Decode and scan raw bytes in one step.
    pub fn scan_bytes(&self, name: &str, bytes: Vec<u8>) -> Result<Vec<Finding>, DecodeError> {
        let unit = SourceUnit::from_bytes(name, bytes)?;
        Ok(self.scan(&unit))
    }
}

//! Higlint core library.
//!
//! This crate exposes programmatic APIs for scanning SwiftUI source text
//! against a catalog of Human Interface Guidelines rules. The scan is a
//! textual heuristic: it does not parse Swift, so matches inside comments or
//! string literals are reported like real code.
//!
//! High-level modules:
//! - `catalog`: Built-in ordered rules, config overrides, and compilation.
//! - `checks`: Implementation of the rule detectors.
//! - `scan`: `SourceUnit` and the `Scanner` that produces findings.
//! - `report`: Summaries, per-rule outcomes, and pass/fail.
//! - `lint`: Multi-file runner over globs with parallel scanning.
//! - `analyze`: Single-unit requests read from stdin.
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Data models for rules, findings, reports, and requests.
//! - `output`: Human/JSON printers.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `error`: Error types.
//! - `utils`: Supporting helpers.
pub mod analyze;
pub mod catalog;
mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod models;
pub mod output;
pub mod report;
pub mod scan;
pub mod utils;

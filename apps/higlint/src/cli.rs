//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "higlint",
    version,
    about = "Heuristic SwiftUI HIG linter",
    long_about = "higlint — a small, fast scanner that flags SwiftUI code drifting from the Human Interface Guidelines: undersized touch targets, hardcoded sizes, colors and fonts, force unwraps, view models without a State enum, and image-only buttons without accessibility labels.\n\nResults are heuristic: source is scanned as text, not parsed.\n\nConfiguration precedence: CLI > higlint.toml > defaults.",
    after_help = "Examples:\n  higlint check\n  higlint check Sources/Views --output json\n  echo '{\"code\": \"Button { }.frame(width: 30, height: 30)\"}' | higlint analyze\n  higlint rules",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current higlint version.")]
    Version,
    /// Lint Swift files
    #[command(
        about = "Lint Swift files",
        long_about = "Scan files matched by the given paths (or the configured patterns) and report findings. Exits 1 when any error-severity finding is present, 2 on usage, config, or read failures.",
        after_help = "Examples:\n  higlint check\n  higlint check App/Views/Close.swift --output json\n  higlint check --disable force_unwrap --min-touch-target 48"
    )]
    Check {
        #[arg(help = "Files, directories, or glob patterns (default: configured patterns)")]
        paths: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Minimum touch target in points (default: 44)")]
        min_touch_target: Option<f64>,
        #[arg(long, help = "Disable a rule by id (repeatable)")]
        disable: Vec<String>,
    },
    /// Analyze one request from stdin
    #[command(
        about = "Analyze source from stdin",
        long_about = "Read a JSON request {\"code\": \"...\", \"name\": \"...\"} (or raw text with --raw) from stdin and print the analyzer response. Exits 1 when any error-severity finding is present, 2 on malformed input.",
        after_help = "Examples:\n  echo '{\"code\": \"let x = y!\"}' | higlint analyze\n  higlint analyze --raw < ContentView.swift"
    )]
    Analyze {
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Treat stdin as raw source text instead of a JSON request")]
        raw: bool,
        #[arg(long, help = "Repository root used for config discovery (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: json|human (default: json)")]
        output: Option<String>,
        #[arg(long, help = "Minimum touch target in points (default: 44)")]
        min_touch_target: Option<f64>,
        #[arg(long, help = "Disable a rule by id (repeatable)")]
        disable: Vec<String>,
    },
    /// List rules
    #[command(
        about = "List rules",
        long_about = "Print the effective rule catalog after config overrides, in evaluation order."
    )]
    Rules {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}

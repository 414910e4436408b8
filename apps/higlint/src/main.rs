//! Higlint CLI binary entry point.
//! Delegates to the library for check/analyze/rules and prints results.

use clap::Parser;
use higlint::catalog::Catalog;
use higlint::cli::{Cli, Commands};
use higlint::config::{self, CliOverrides, Effective};
use higlint::{analyze, lint, output, utils};
use std::process::exit;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Check {
            paths,
            repo_root,
            output,
            min_touch_target,
            disable,
        } => {
            let eff = resolve_or_exit(&CliOverrides {
                repo_root: repo_root.as_deref(),
                output: output.as_deref(),
                min_touch_target,
                disable: &disable,
            });
            if eff.config_path.is_none() && eff.output != "json" {
                eprintln!(
                    "{} No higlint.toml found; using defaults.",
                    utils::note_prefix()
                );
            }
            if paths.is_empty() && eff.output != "json" {
                eprintln!(
                    "{} Using patterns: [{}]",
                    utils::info_prefix(),
                    eff.patterns.join(", ")
                );
            }
            let catalog = catalog_or_exit(&eff);
            let (report, errors) = lint::run_lint(&eff, &catalog, &paths);
            output::print_report(&report, &eff.output, &errors);
            if !report.passed {
                exit(1);
            }
            if !errors.is_empty() {
                exit(2);
            }
        }
        Commands::Analyze {
            raw,
            repo_root,
            output,
            min_touch_target,
            disable,
        } => {
            let eff = resolve_or_exit(&CliOverrides {
                repo_root: repo_root.as_deref(),
                output: Some(output.as_deref().unwrap_or("json")),
                min_touch_target,
                disable: &disable,
            });
            let catalog = catalog_or_exit(&eff);
            let unit = match analyze::read_request(std::io::stdin().lock(), raw) {
                Ok(u) => u,
                Err(e) => {
                    tracing::debug!(error = %e, "rejected analyze request");
                    if eff.output == "human" {
                        eprintln!("{} {}", utils::error_prefix(), e);
                    } else {
                        output::print_analyze_error(&e.to_string());
                    }
                    exit(2);
                }
            };
            let report = analyze::analyze(&catalog, &unit);
            output::print_analyze(&report, &eff.output);
            if !report.passed {
                exit(1);
            }
        }
        Commands::Rules { repo_root, output } => {
            let eff = resolve_or_exit(&CliOverrides {
                repo_root: repo_root.as_deref(),
                output: output.as_deref(),
                ..Default::default()
            });
            let catalog = catalog_or_exit(&eff);
            output::print_rules(&catalog, &eff.output);
        }
    }
}

fn resolve_or_exit(cli: &CliOverrides<'_>) -> Effective {
    match config::resolve_effective(cli) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            exit(2);
        }
    }
}

/// Build the effective catalog. A rule that fails to compile aborts the run.
fn catalog_or_exit(eff: &Effective) -> Catalog {
    match Catalog::builtin(eff.min_touch_target, &eff.rule_overrides) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            exit(2);
        }
    }
}

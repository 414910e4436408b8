//! Configuration discovery and effective settings resolution.
//!
//! Higlint reads `higlint.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `patterns`: `["**/*.swift"]`
//! - `min_touch_target`: `44`
//! - `rules.<id>`: every built-in rule enabled at its declared severity
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::catalog::DEFAULT_MIN_TOUCH_TARGET;
use crate::error::ConfigError;
use crate::models::Severity;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["higlint.toml", "higlint.yaml", "higlint.yml"];

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
/// Per-rule section `[rules.<id>]`.
pub struct RuleOverride {
    pub enabled: Option<bool>,
    pub severity: Option<Severity>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `higlint.toml|yaml`.
pub struct HiglintConfig {
    pub output: Option<String>,
    pub patterns: Option<Vec<String>>,
    pub min_touch_target: Option<f64>,
    #[serde(default)]
    pub rules: HashMap<String, RuleOverride>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub output: String,
    pub patterns: Vec<String>,
    pub min_touch_target: f64,
    pub rule_overrides: HashMap<String, RuleOverride>,
}

/// CLI-side values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides<'a> {
    pub repo_root: Option<&'a str>,
    pub output: Option<&'a str>,
    pub min_touch_target: Option<f64>,
    pub disable: &'a [String],
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `higlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `HiglintConfig` from the first config file present under `root`.
///
/// Returns `Ok(None)` when no config file exists; a file that exists but
/// cannot be read or parsed is an error, never a silent default.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, HiglintConfig)>, ConfigError> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let cfg = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|source| ConfigError::Toml {
                path: path.clone(),
                source,
            })?
        } else {
            serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
                path: path.clone(),
                source,
            })?
        };
        return Ok(Some((path, cfg)));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides<'_>) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli.repo_root.unwrap_or("."));
    let start = fs::canonicalize(&start).unwrap_or(start);
    let repo_root = detect_repo_root(&start);
    let (config_path, cfg) = match load_config(&repo_root)? {
        Some((p, c)) => (Some(p), c),
        None => (None, HiglintConfig::default()),
    };

    let output = cli
        .output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let patterns = cfg
        .patterns
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| vec!["**/*.swift".to_string()]);

    let min_touch_target = cli
        .min_touch_target
        .or(cfg.min_touch_target)
        .unwrap_or(DEFAULT_MIN_TOUCH_TARGET);

    // --disable wins over [rules.<id>].enabled but keeps any severity override
    let mut rule_overrides = cfg.rules;
    for id in cli.disable {
        rule_overrides.entry(id.clone()).or_default().enabled = Some(false);
    }

    Ok(Effective {
        repo_root,
        config_path,
        output,
        patterns,
        min_touch_target,
        rule_overrides,
    })
}

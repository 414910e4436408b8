//! Error types shared by the catalog, scanner, config loader, and analyze mode.

use std::path::PathBuf;
use thiserror::Error;

/// Source text could not be interpreted as UTF-8.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{name}: source is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
pub struct DecodeError {
    pub name: String,
    pub valid_up_to: usize,
}

/// A catalog defect. Raised while compiling rules, before any text is scanned.
#[derive(Debug, Error)]
pub enum RuleEvaluationError {
    #[error("rule '{rule_id}' has invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        rule_id: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule id '{0}' is declared more than once")]
    DuplicateId(String),

    #[error("rule '{rule_id}' has an invalid threshold: {reason}")]
    InvalidThreshold { rule_id: String, reason: String },
}

/// Malformed stdin request for `higlint analyze`.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request has no `code` field")]
    MissingCode,

    #[error("failed to read request: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Failure to load `higlint.toml|yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

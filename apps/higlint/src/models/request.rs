//! Stdin request accepted by `higlint analyze`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
/// One unit of source to analyze. `name` only labels findings.
pub struct AnalyzeRequest {
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

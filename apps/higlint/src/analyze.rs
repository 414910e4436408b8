//! Single-unit analysis for requests piped on stdin.
//!
//! The request is one JSON object `{"code": "...", "name": "..."}` or, in
//! raw mode, the source text itself. An empty `code` is a valid request and
//! yields a passing report.
//!
//! Only raw input goes through `SourceUnit::from_bytes`, so only raw input
//! can fail with `RequestError::Decode`. JSON must be UTF-8 as a whole; a
//! request with invalid UTF-8 anywhere, including inside `code`, is rejected
//! by the JSON parser as `RequestError::Json`.

use crate::catalog::Catalog;
use crate::error::RequestError;
use crate::models::request::AnalyzeRequest;
use crate::models::Report;
use crate::report::summarize;
use crate::scan::{Scanner, SourceUnit};
use std::io::Read;

pub const STDIN_NAME: &str = "<stdin>";

/// Parse a request payload into a source unit.
pub fn parse_request(input: Vec<u8>, raw: bool) -> Result<SourceUnit, RequestError> {
    if raw {
        return Ok(SourceUnit::from_bytes(STDIN_NAME, input)?);
    }
    let req: AnalyzeRequest = serde_json::from_slice(&input)?;
    let code = req.code.ok_or(RequestError::MissingCode)?;
    let name = req.name.unwrap_or_else(|| STDIN_NAME.to_string());
    Ok(SourceUnit::new(name, code))
}

/// Read the whole request from `reader` and parse it.
pub fn read_request(mut reader: impl Read, raw: bool) -> Result<SourceUnit, RequestError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse_request(buf, raw)
}

/// Scan one unit and summarize it.
pub fn analyze(catalog: &Catalog, unit: &SourceUnit) -> Report {
    let findings = Scanner::new(catalog).scan(unit);
    let mut report = summarize(findings, catalog);
    report.summary.files = 1;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::all_rules;

    fn catalog() -> Catalog {
        Catalog::compile(all_rules()).unwrap()
    }

    #[test]
    fn test_json_request_is_analyzed() {
        let input = br#"{"code": "Button { }.frame(width: 30, height: 30)", "name": "Close.swift"}"#;
        let unit = read_request(&input[..], false).unwrap();
        assert_eq!(unit.name, "Close.swift");
        let report = analyze(&catalog(), &unit);
        assert!(!report.passed);
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.findings[0].file, "Close.swift");
    }

    #[test]
    fn test_empty_code_passes() {
        let unit = parse_request(b"{\"code\": \"\"}\n".to_vec(), false).unwrap();
        assert_eq!(unit.name, STDIN_NAME);
        let report = analyze(&catalog(), &unit);
        assert!(report.passed);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_bad_requests_are_rejected() {
        assert!(matches!(
            parse_request(b"{not json".to_vec(), false),
            Err(RequestError::Json(_))
        ));
        assert!(matches!(
            parse_request(b"{\"name\": \"x\"}".to_vec(), false),
            Err(RequestError::MissingCode)
        ));
        assert!(matches!(
            parse_request(vec![0xc3, 0x28], true),
            Err(RequestError::Decode(_))
        ));
        let mut bad_code = b"{\"code\": \"let x".to_vec();
        bad_code.extend_from_slice(&[0xff, 0xfe]);
        bad_code.extend_from_slice(b"\"}");
        assert!(matches!(
            parse_request(bad_code, false),
            Err(RequestError::Json(_))
        ));
    }

    #[test]
    fn test_raw_request_uses_text_verbatim() {
        let unit = parse_request(b"let x = y!\n".to_vec(), true).unwrap();
        let report = analyze(&catalog(), &unit);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].rule, "force_unwrap");
    }
}

//! Implementation of the rule detectors.
//!
//! Every detector works on raw text: there is no Swift grammar here, only
//! regexes plus a little bracket balancing. Matches inside comments and string
//! literals are reported like any other match (the force-unwrap detector is
//! the one exception and skips `//` line comments).

use crate::catalog::Detector;

/// A `.frame(...)` call whose argument list has no nested parentheses.
pub(crate) const FRAME_PATTERN: &str = r"\.frame\(\s*(?P<args>[^()]*)\)";
/// A literal fixed dimension inside a frame argument list.
pub(crate) const FRAME_DIMENSION_PATTERN: &str =
    r"\b(?P<dimension>width|height)\s*:\s*(?P<size>\d+(?:\.\d+)?)\b";
/// Candidate postfix `!`; the detector filters out `!=` and `try!`.
pub(crate) const FORCE_UNWRAP_PATTERN: &str = r"[\w)\]]!";

/// Raw match produced by a detector before it becomes a `Finding`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Hit {
    pub offset: usize,
    pub vars: Vec<(String, String)>,
}

impl Hit {
    fn at(offset: usize) -> Self {
        Hit {
            offset,
            vars: Vec::new(),
        }
    }
}

/// Run one detector over `text`. Hits come back in left-to-right order.
pub(crate) fn detect(detector: &Detector, text: &str) -> Vec<Hit> {
    match detector {
        Detector::Pattern(re) => re
            .captures_iter(text)
            .map(|caps| {
                let whole = caps.get(0).map(|m| m.start()).unwrap_or(0);
                let vars = re
                    .capture_names()
                    .flatten()
                    .filter_map(|name| caps.name(name).map(|m| (name.to_string(), m.as_str().to_string())))
                    .collect();
                Hit {
                    offset: whole,
                    vars,
                }
            })
            .collect(),
        Detector::Frame {
            frame,
            dimension,
            min,
            below,
        } => detect_frames(frame, dimension, *min, *below, text),
        Detector::ForceUnwrap(re) => detect_force_unwraps(re, text),
        Detector::MissingCompanion { subject, companion } => {
            if companion.is_match(text) {
                return Vec::new();
            }
            subject
                .captures_iter(text)
                .filter_map(|caps| {
                    let start = caps.get(0)?.start();
                    let vars = subject
                        .capture_names()
                        .flatten()
                        .filter_map(|name| caps.name(name).map(|m| (name.to_string(), m.as_str().to_string())))
                        .collect();
                    Some(Hit {
                        offset: start,
                        vars,
                    })
                })
                .collect()
        }
        Detector::UnlabeledControl {
            control,
            content,
            title,
            label,
        } => control
            .find_iter(text)
            .filter_map(|m| {
                let start = m.start();
                let body_end = element_end(text.as_bytes(), m.end() - 1);
                let chain_end = modifier_chain_end(text.as_bytes(), body_end);
                let body = &text[start..body_end];
                let chain = &text[body_end..chain_end];
                let unlabeled = content.is_match(body)
                    && !title.is_match(body)
                    && !label.is_match(body)
                    && !label.is_match(chain);
                unlabeled.then(|| Hit::at(start))
            })
            .collect(),
    }
}

fn detect_frames(
    frame: &regex::Regex,
    dimension: &regex::Regex,
    min: f64,
    below: bool,
    text: &str,
) -> Vec<Hit> {
    let mut hits = Vec::new();
    for caps in frame.captures_iter(text) {
        let (Some(whole), Some(args)) = (caps.get(0), caps.name("args")) else {
            continue;
        };
        // (dimension, literal as written, parsed value)
        let dims: Vec<(&str, &str, f64)> = dimension
            .captures_iter(args.as_str())
            .filter_map(|d| {
                let name = d.name("dimension")?.as_str();
                let literal = d.name("size")?.as_str();
                Some((name, literal, literal.parse::<f64>().ok()?))
            })
            .collect();
        if dims.is_empty() {
            continue;
        }
        let picked = if below {
            // Report the smallest offending dimension once per directive.
            dims.iter()
                .filter(|(_, _, v)| *v < min)
                .min_by(|a, b| a.2.total_cmp(&b.2))
                .copied()
        } else if dims.iter().all(|(_, _, v)| *v >= min) {
            dims.first().copied()
        } else {
            None
        };
        if let Some((name, literal, _)) = picked {
            hits.push(Hit {
                offset: whole.start(),
                vars: vec![
                    ("dimension".into(), name.to_string()),
                    ("size".into(), literal.to_string()),
                    ("min".into(), fmt_points(min)),
                ],
            });
        }
    }
    hits
}

fn detect_force_unwraps(re: &regex::Regex, text: &str) -> Vec<Hit> {
    let bytes = text.as_bytes();
    re.find_iter(text)
        .filter_map(|m| {
            let bang = m.end() - 1;
            if bytes.get(bang + 1) == Some(&b'=') {
                return None;
            }
            if is_try_bang(&text[..bang]) {
                return None;
            }
            let line_start = text[..bang].rfind('\n').map(|i| i + 1).unwrap_or(0);
            if text[line_start..bang].contains("//") {
                return None;
            }
            Some(Hit::at(bang))
        })
        .collect()
}

/// `before` ends with the keyword `try` (and not e.g. `retry`).
fn is_try_bang(before: &str) -> bool {
    match before.strip_suffix("try") {
        Some(rest) => !rest
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}

/// End of a control starting at `open` (`(` or `{`): its argument list plus
/// any trailing closures, including labeled ones like `label: { ... }`.
fn element_end(b: &[u8], open: usize) -> usize {
    let mut pos = open;
    if b.get(pos) == Some(&b'(') {
        pos = close_of(b, pos, b'(', b')');
    }
    let mut closures = 0usize;
    loop {
        let p = skip_ws(b, pos);
        if b.get(p) == Some(&b'{') {
            pos = close_of(b, p, b'{', b'}');
            closures += 1;
            continue;
        }
        if closures > 0 {
            if let Some(q) = labeled_closure(b, p) {
                pos = close_of(b, q, b'{', b'}');
                continue;
            }
        }
        return pos;
    }
}

/// End of a `.modifier(...)` chain following `pos`.
fn modifier_chain_end(b: &[u8], mut pos: usize) -> usize {
    loop {
        let p = skip_ws(b, pos);
        if b.get(p) != Some(&b'.') || !b.get(p + 1).is_some_and(|c| is_ident_start(*c)) {
            return pos;
        }
        let mut q = p + 1;
        while b.get(q).is_some_and(|c| is_ident(*c)) {
            q += 1;
        }
        if b.get(q) == Some(&b'(') {
            q = close_of(b, q, b'(', b')');
        }
        let r = skip_ws(b, q);
        if b.get(r) == Some(&b'{') {
            q = close_of(b, r, b'{', b'}');
        }
        pos = q;
    }
}

/// `ident ws? : ws? {` starting at `p`; returns the index of `{`.
fn labeled_closure(b: &[u8], p: usize) -> Option<usize> {
    if !b.get(p).is_some_and(|c| is_ident_start(*c)) {
        return None;
    }
    let mut q = p;
    while b.get(q).is_some_and(|c| is_ident(*c)) {
        q += 1;
    }
    q = skip_ws(b, q);
    if b.get(q) != Some(&b':') {
        return None;
    }
    q = skip_ws(b, q + 1);
    (b.get(q) == Some(&b'{')).then_some(q)
}

/// Index just past the delimiter closing `b[open]`, or the end of input when
/// the text is unbalanced.
fn close_of(b: &[u8], open: usize, o: u8, c: u8) -> usize {
    let mut depth = 0usize;
    for (i, &ch) in b.iter().enumerate().skip(open) {
        if ch == o {
            depth += 1;
        } else if ch == c {
            depth -= 1;
            if depth == 0 {
                return i + 1;
            }
        }
    }
    b.len()
}

fn skip_ws(b: &[u8], mut pos: usize) -> usize {
    while b.get(pos).is_some_and(|c| c.is_ascii_whitespace()) {
        pos += 1;
    }
    pos
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Render a point value without a trailing `.0` for whole numbers.
pub(crate) fn fmt_points(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Fill `{name}` placeholders in a message template.
pub(crate) fn render(template: &str, vars: &[(String, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{}}}", k), v);
    }
    out
}

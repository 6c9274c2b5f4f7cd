//! Repair pipeline for model output that should be JSON but often is not quite.
//!
//! Two stages, always in this order:
//! 1. `strip_code_fences`: keep only what sits between the first opening fence
//!    and the last closing fence. Fences count only at line boundaries, so
//!    backticks inside a JSON string value are never mistaken for one.
//! 2. `repair_json`: a fixed, ordered list of regex rewrites targeting the
//!    malformations models produce most: trailing commas and missing separators.
//!
//! Each rewrite is idempotent and none of them produces input for an earlier
//! one, so `sanitize(sanitize(x)) == sanitize(x)`.
//!
//! Known limitation: the adjacent-string rewrite does not know whether it is
//! inside a string literal. Any quote, whitespace, quote sequence gets a comma,
//! so a whitespace-only value (`" "`) becomes `", "` and a value containing
//! `\" \"` (escaped quotes around whitespace) has its content altered.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

const FENCE: &str = "```";

struct Repair {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl Repair {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("repair pattern must compile"),
            replacement,
        }
    }
}

/// Order matters: trailing commas go first so the separator rewrites never
/// see a `,}` or `,]` they could interact with. A run of commas is removed
/// in one pass.
static REPAIRS: Lazy<Vec<Repair>> = Lazy::new(|| {
    vec![
        Repair::new("trailing_comma_object", r",[\s,]*\}", "}"),
        Repair::new("trailing_comma_array", r",[\s,]*\]", "]"),
        Repair::new("adjacent_strings", r#""(\s+)""#, r#"",${1}""#),
        Repair::new("adjacent_objects", r"\}(\s*)\{", "},${1}{"),
        Repair::new("array_then_object", r"\](\s*)\{", "],${1}{"),
        Repair::new("object_then_array", r"\}(\s*)\[", "},${1}["),
    ]
});

/// Full sanitisation: fence stripping followed by the repair pipeline.
pub fn sanitize(raw: &str) -> String {
    repair_json(strip_code_fences(raw))
}

/// Returns the content between the first opening fence and the last closing
/// fence.
///
/// An opening fence must start its line and may carry a language tag
/// (` ```json `). A closing fence must start or end its line. Text without
/// such a pair is returned unmodified.
pub fn strip_code_fences(text: &str) -> &str {
    let Some(open) = fence_positions(text).find(|&i| starts_line(text, i)) else {
        return text;
    };

    let after_fence = open + FENCE.len();
    let tag_len = text[after_fence..]
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(text.len() - after_fence);
    let body_start = after_fence + tag_len;

    let close = fence_positions(text)
        .filter(|&i| i >= body_start && (starts_line(text, i) || ends_line(text, i)))
        .last();
    match close {
        Some(close) => text[body_start..close].trim(),
        None => text,
    }
}

fn fence_positions(text: &str) -> impl Iterator<Item = usize> + '_ {
    text.match_indices(FENCE).map(|(i, _)| i)
}

/// Only whitespace between the previous newline (or the start) and `i`.
fn starts_line(text: &str, i: usize) -> bool {
    let line_start = text[..i].rfind('\n').map_or(0, |n| n + 1);
    text[line_start..i].trim().is_empty()
}

/// Only whitespace between the fence at `i` and the next newline (or the end).
fn ends_line(text: &str, i: usize) -> bool {
    let rest = &text[i + FENCE.len()..];
    let line_end = rest.find('\n').unwrap_or(rest.len());
    rest[..line_end].trim().is_empty()
}

/// Applies every rewrite in order.
pub fn repair_json(text: &str) -> String {
    let mut out = text.to_string();
    for repair in REPAIRS.iter() {
        if repair.pattern.is_match(&out) {
            trace!(repair = repair.name, "Applying JSON repair");
            out = repair
                .pattern
                .replace_all(&out, repair.replacement)
                .into_owned();
        }
    }
    out
}

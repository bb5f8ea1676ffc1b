// Cleanup and validation of raw text-provider responses.
//
// The provider speaks an informal contract: responses arrive wrapped
// in quotes, prefixed with boilerplate, or with a stray JSON blob in
// front of the actual copy. Cleanup normalizes all of that; validation
// decides whether the survivor is usable at all.

use crate::core::config::CaptionConfig;
use crate::core::types::AdFormat;

/// Line prefixes stripped verbatim (case-insensitive)
const LITERAL_PREFIXES: [&str; 2] = ["advertisement:", "ad:"];

/// Prefixes stripped up to the first colon on the first line
const COLON_PREFIXES: [&str; 2] = ["here's", "generated"];

/// Normalize a raw provider response.
///
/// Steps, in order: strip one layer of wrapping quotes, strip known
/// boilerplate prefixes, strip a leading JSON blob, then for the short
/// format reduce to the best two lines.
pub fn clean(raw: &str, format: AdFormat) -> String {
    let mut text = raw.trim().to_string();
    text = strip_wrapping_quotes(&text);
    text = strip_boilerplate_prefixes(text);
    text = strip_leading_json_blob(&text);
    if format.is_short() {
        text = select_short_lines(&text);
    }
    text.trim().to_string()
}

/// Validate a cleaned caption for the given format.
///
/// Accepted iff `len > min && len <= max` and the text carries no
/// upstream error marker. Rejection is a strategy failure, not an
/// error; the reason string feeds the chain's logs.
pub fn validate(text: &str, format: AdFormat, bounds: &CaptionConfig) -> Result<(), String> {
    let (min, max) = bounds.range(format);
    let len = text.chars().count();
    if len <= min {
        return Err(format!("caption too short: {len} chars, minimum {min} exclusive"));
    }
    if len > max {
        return Err(format!("caption too long: {len} chars, maximum {max}"));
    }
    if text.contains("error") || text.contains("Error") {
        return Err("caption contains an upstream error marker".to_string());
    }
    Ok(())
}

fn strip_wrapping_quotes(text: &str) -> String {
    let mut s = text;
    if let Some(rest) = s.strip_prefix(['"', '\'']) {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix(['"', '\'']) {
        s = rest;
    }
    s.to_string()
}

fn strip_boilerplate_prefixes(mut text: String) -> String {
    for prefix in LITERAL_PREFIXES {
        if starts_with_ignore_case(&text, prefix) {
            text = text[prefix.len()..].trim_start().to_string();
        }
    }
    for marker in COLON_PREFIXES {
        if starts_with_ignore_case(&text, marker) {
            let line_end = text.find('\n').unwrap_or(text.len());
            if let Some(colon) = text[..line_end].find(':') {
                text = text[colon + 1..].trim_start().to_string();
            }
        }
    }
    text
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Drop a `{...}` blob (no nested braces) at the start of the text.
fn strip_leading_json_blob(text: &str) -> String {
    let trimmed = text.trim_start();
    if let Some(rest) = trimmed.strip_prefix('{') {
        if let Some(close) = rest.find('}') {
            return rest[close + 1..].trim_start().to_string();
        }
    }
    text.to_string()
}

/// Keep the first two content lines of a short caption.
///
/// A content line is longer than 10 characters, is not a hashtag line,
/// and carries at least one alphanumeric character (pure-emoji lines
/// fail this). When the response doesn't have two such lines, fall
/// back to the first two non-blank lines as-is.
fn select_short_lines(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let content: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| is_content_line(line))
        .collect();
    let chosen = if content.len() >= 2 {
        &content[..2]
    } else {
        &lines[..lines.len().min(2)]
    };
    chosen.join("\n")
}

fn is_content_line(line: &str) -> bool {
    line.chars().count() > 10
        && !line.starts_with('#')
        && line.chars().any(|c| c.is_alphanumeric())
}

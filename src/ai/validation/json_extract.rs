//! JSON Extraction
//!
//! Pulls a JSON object out of free-form LLM response text.
//!
//! Handles the common shapes of model output:
//! - Markdown code fence wrapping (```json ... ``` or bare ``` ... ```)
//! - JSON embedded in explanatory text
//! - Braces inside string literals
//!
//! No repair is attempted: text that does not contain a well-formed object is
//! reported as a parse failure so callers can substitute a placeholder.

use serde_json::Value;
use tracing::debug;

use crate::types::{CodeGradeError, Result};

const FENCE: &str = "```";

/// Extract and parse the first JSON object in an LLM response.
///
/// Candidates are tried in order: fenced blocks labeled `json`, other fenced
/// blocks, then the raw text. Within each candidate the first balanced
/// `{ ... }` span is used.
pub fn parse_json_object(raw: &str) -> Result<Value> {
    let candidate = extract_json_object(raw).ok_or_else(|| CodeGradeError::Parse {
        message: "no JSON object found".to_string(),
        path: "response".to_string(),
    })?;

    let value: Value = serde_json::from_str(candidate).map_err(|e| CodeGradeError::Parse {
        message: e.to_string(),
        path: "response".to_string(),
    })?;

    if !value.is_object() {
        return Err(CodeGradeError::Parse {
            message: "top-level JSON value is not an object".to_string(),
            path: "response".to_string(),
        });
    }

    Ok(value)
}

/// Locate the first balanced JSON object, preferring fenced code blocks.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let text = raw.trim_start_matches('\u{feff}');

    let mut blocks = fenced_blocks(text);
    // Stable sort keeps document order within each group
    blocks.sort_by_key(|(label, _)| !label.eq_ignore_ascii_case("json"));

    for (label, body) in &blocks {
        if let Some(object) = first_balanced_object(body) {
            debug!("Found JSON object in fenced block (label: {:?})", label);
            return Some(object);
        }
    }

    first_balanced_object(text)
}

/// Fenced code blocks as (label, body) pairs in document order.
fn fenced_blocks(text: &str) -> Vec<(&str, &str)> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let label_len = after_open
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(after_open.len());
        let label = &after_open[..label_len];
        let body = &after_open[label_len..];

        let Some(close) = body.find(FENCE) else {
            break;
        };

        blocks.push((label, &body[..close]));
        rest = &body[close + FENCE.len()..];
    }

    blocks
}

/// First `{ ... }` span whose braces balance outside string literals.
fn first_balanced_object(s: &str) -> Option<&str> {
    let mut search_from = 0;

    while let Some(offset) = s[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(len) = balanced_len(&s[start..]) {
            return Some(&s[start..start + len]);
        }
        search_from = start + 1;
    }

    None
}

/// Byte length of the balanced object starting at `s[0] == '{'`.
fn balanced_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (i, ch) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        let value = parse_json_object(r#"{"rating": 7}"#).unwrap();
        assert_eq!(value["rating"], 7);
    }

    #[test]
    fn test_json_fence() {
        let input = "```json\n{\"rating\": 7, \"complexity\": \"O(n)\"}\n```";
        let value = parse_json_object(input).unwrap();
        assert_eq!(value["rating"], 7);
        assert_eq!(value["complexity"], "O(n)");
    }

    #[test]
    fn test_fence_with_surrounding_text() {
        let input = "Here is my review:\n```json\n{\"rating\": 4}\n```\nLet me know {if} you need more.";
        let value = parse_json_object(input).unwrap();
        assert_eq!(value["rating"], 4);
    }

    #[test]
    fn test_json_fence_preferred_over_other_blocks() {
        let input = "```rust\nfn main() { println!(\"{}\", 1); }\n```\n```json\n{\"rating\": 9}\n```";
        let value = parse_json_object(input).unwrap();
        assert_eq!(value["rating"], 9);
    }

    #[test]
    fn test_bare_fence() {
        let input = "```\n{\"rating\": 2}\n```";
        let value = parse_json_object(input).unwrap();
        assert_eq!(value["rating"], 2);
    }

    #[test]
    fn test_embedded_in_prose() {
        let input = "Sure! {\"rating\": 5, \"explanation\": \"uses } in text\"} Hope this helps.";
        let value = parse_json_object(input).unwrap();
        assert_eq!(value["rating"], 5);
        assert_eq!(value["explanation"], "uses } in text");
    }

    #[test]
    fn test_escaped_quotes_in_strings() {
        let input = r#"{"explanation": "say \"hi\" {", "rating": 3}"#;
        let value = parse_json_object(input).unwrap();
        assert_eq!(value["rating"], 3);
    }

    #[test]
    fn test_unclosed_fence_falls_back_to_raw() {
        let input = "```json\n{\"rating\": 6}";
        let value = parse_json_object(input).unwrap();
        assert_eq!(value["rating"], 6);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(parse_json_object("```json\n{\"rating\": 7,\n```").is_err());
        assert!(parse_json_object(r#"{"rating": 7,}"#).is_err());
        assert!(parse_json_object("no json here").is_err());
        assert!(parse_json_object("").is_err());
    }

    #[test]
    fn test_extract_returns_none_without_object() {
        assert_eq!(extract_json_object("[1, 2, 3]"), None);
        assert_eq!(extract_json_object("}{"), None);
    }
}

//! Field extractor: pull a JSON object out of a raw model response.
//!
//! Models wrap their answer in markdown fences more often than not,
//! sometimes with surrounding prose. Only the first fenced block is
//! consulted; a json-tagged fence takes precedence over a bare one.

use cardlens_core::{CandidateFieldMap, CardError};
use tracing::debug;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Parse the model's raw response text into a candidate field mapping.
///
/// On failure the original text travels with the error so the caller
/// can log or persist it for diagnostics.
pub fn extract_candidate_map(raw: &str) -> Result<CandidateFieldMap, CardError> {
    let body = strip_fences(raw).trim();
    debug!(bytes = body.len(), "Parsing extracted model payload");

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| CardError::MalformedJson {
            detail: e.to_string(),
            original_text: raw.to_string(),
        })?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(CardError::MalformedJson {
            detail: format!("expected a JSON object, got {}", json_kind(&other)),
            original_text: raw.to_string(),
        }),
    }
}

/// Select the candidate JSON substring. A missing closing fence yields
/// the remainder of the string, which then fails JSON parsing upstream
/// rather than crashing here.
fn strip_fences(raw: &str) -> &str {
    if let Some(start) = raw.find(JSON_FENCE) {
        let rest = &raw[start + JSON_FENCE.len()..];
        match rest.find(FENCE) {
            Some(end) => &rest[..end],
            None => rest,
        }
    } else if let Some(start) = raw.find(FENCE) {
        let rest = &raw[start + FENCE.len()..];
        match rest.find(FENCE) {
            Some(end) => &rest[..end],
            None => rest,
        }
    } else {
        raw
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_JSON: &str = r#"{"name": "Jane Doe", "phone": "010-1234-5678"}"#;

    #[test]
    fn fenced_and_unfenced_parse_identically() {
        let plain = extract_candidate_map(CARD_JSON).unwrap();
        let fenced = extract_candidate_map(&format!("```json\n{CARD_JSON}\n```")).unwrap();
        let bare_fenced = extract_candidate_map(&format!("```\n{CARD_JSON}\n```")).unwrap();
        assert_eq!(plain, fenced);
        assert_eq!(plain, bare_fenced);
    }

    #[test]
    fn surrounding_prose_is_ignored() {
        let raw = format!("Here is the extracted data:\n```json\n{CARD_JSON}\n```\nLet me know!");
        let map = extract_candidate_map(&raw).unwrap();
        assert_eq!(map["name"], "Jane Doe");
    }

    #[test]
    fn only_first_fenced_block_is_used() {
        let raw = "```json\n{\"name\": \"first\"}\n```\nand also:\n```json\n{\"name\": \"second\"}\n```";
        let map = extract_candidate_map(raw).unwrap();
        assert_eq!(map["name"], "first");
    }

    #[test]
    fn missing_closing_fence_reports_malformed_json() {
        let raw = "```json\n{\"name\": \"Jane\"";
        let err = extract_candidate_map(raw).unwrap_err();
        match err {
            CardError::MalformedJson { original_text, .. } => assert_eq!(original_text, raw),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unterminated_object_keeps_original_text() {
        let raw = "{\"name\": \"Jane\", \"phone\":";
        let err = extract_candidate_map(raw).unwrap_err();
        match err {
            CardError::MalformedJson {
                detail,
                original_text,
            } => {
                assert!(!detail.is_empty());
                assert_eq!(original_text, raw);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_json_is_rejected() {
        let err = extract_candidate_map("```json\n[1, 2, 3]\n```").unwrap_err();
        match err {
            CardError::MalformedJson { detail, .. } => assert!(detail.contains("array")),
            other => panic!("unexpected error: {other}"),
        }
    }
}

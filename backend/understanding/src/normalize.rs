//! Field normalizer: per-field syntactic cleanup of reconciled values.
//!
//! No semantic validation happens here (no digit counts, no country
//! codes); the one strict rule is email, where a value that fails the
//! pattern is dropped to absent rather than passed through.

use cardlens_core::CanonicalField;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Strings that mean "no value" regardless of letter case.
const ABSENT_TOKENS: [&str; 4] = ["null", "none", "n/a", "-"];

static PHONE_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\d+()\-]").unwrap());

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Normalize one reconciled raw value. `None` is the absence marker.
pub fn normalize(field: CanonicalField, raw: &Value) -> Option<String> {
    if is_empty_value(raw) {
        return None;
    }

    let text = value_to_string(raw);
    let trimmed = text.trim();
    if trimmed.is_empty() || is_absent_token(trimmed) {
        return None;
    }

    match field {
        CanonicalField::Phone | CanonicalField::Fax => clean_phone(trimmed),
        CanonicalField::Email => clean_email(trimmed),
        _ => Some(trimmed.to_string()),
    }
}

/// Keep digits, `+`, `-`, and parentheses; drop everything else.
fn clean_phone(raw: &str) -> Option<String> {
    let cleaned = PHONE_STRIP_RE.replace_all(raw, "").into_owned();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Lower-case a syntactically valid email; drop anything else.
fn clean_email(raw: &str) -> Option<String> {
    if EMAIL_RE.is_match(raw) {
        Some(raw.to_lowercase())
    } else {
        None
    }
}

fn is_absent_token(trimmed: &str) -> bool {
    ABSENT_TOKENS
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Empty in the source's truthiness sense: null, empty string, false,
/// zero, or an empty container.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // Nested structures pass through as their compact JSON text.
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn norm(field: CanonicalField, value: Value) -> Option<String> {
        normalize(field, &value)
    }

    #[test]
    fn absent_tokens_normalize_to_absent_in_any_case() {
        for field in CanonicalField::ALL {
            for raw in ["", "null", "NULL", "None", "n/a", "N/A", "-", "  none  "] {
                assert_eq!(norm(field, json!(raw)), None, "field {field} value {raw:?}");
            }
            assert_eq!(norm(field, Value::Null), None);
        }
    }

    #[test]
    fn falsy_scalars_normalize_to_absent() {
        assert_eq!(norm(CanonicalField::Name, json!(false)), None);
        assert_eq!(norm(CanonicalField::Phone, json!(0)), None);
        assert_eq!(norm(CanonicalField::Company, json!([])), None);
    }

    #[test]
    fn phone_strips_letters_and_spaces_but_keeps_separators() {
        assert_eq!(
            norm(CanonicalField::Phone, json!("Tel: 010-1234-5678")),
            Some("010-1234-5678".into())
        );
        assert_eq!(
            norm(CanonicalField::Fax, json!("+82 (2) 555 0100")),
            Some("+82(2)5550100".into())
        );
    }

    #[test]
    fn phone_with_no_phone_characters_is_absent() {
        assert_eq!(norm(CanonicalField::Phone, json!("call me maybe")), None);
    }

    #[test]
    fn email_is_lowercased_and_idempotent() {
        assert_eq!(
            norm(CanonicalField::Email, json!("Foo@Bar.COM")),
            Some("foo@bar.com".into())
        );
        assert_eq!(
            norm(CanonicalField::Email, json!("foo@bar.com")),
            Some("foo@bar.com".into())
        );
    }

    #[test]
    fn invalid_email_is_dropped_not_passed_through() {
        assert_eq!(norm(CanonicalField::Email, json!("not-an-email")), None);
        assert_eq!(norm(CanonicalField::Email, json!("user@host")), None);
    }

    #[test]
    fn generic_fields_pass_through_trimmed_and_unfolded() {
        assert_eq!(
            norm(CanonicalField::Company, json!("  Acme Corp  ")),
            Some("Acme Corp".into())
        );
        assert_eq!(
            norm(CanonicalField::Name, json!("McAllister")),
            Some("McAllister".into())
        );
    }

    #[test]
    fn numeric_values_coerce_to_their_string_form() {
        assert_eq!(norm(CanonicalField::SocialId, json!(12345)), Some("12345".into()));
    }
}

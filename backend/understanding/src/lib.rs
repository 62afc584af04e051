//! The deterministic core of the CardLens pipeline.
//!
//! Takes the raw (possibly fenced, possibly malformed) JSON blob an LLM
//! returned for a business card and produces a clean, fixed-schema
//! record: extract -> reconcile -> normalize -> assemble.

pub mod assemble;
pub mod extract;
pub mod normalize;
pub mod reconcile;

pub use assemble::assemble;
pub use extract::extract_candidate_map;
pub use normalize::normalize;
pub use reconcile::{reconcile, reconcile_field, ReconciledMap};

use cardlens_core::{CandidateFieldMap, CanonicalField, CleanedRecord};

/// Reconcile and normalize a candidate mapping into a `CleanedRecord`.
///
/// Total over its input: unknown keys are ignored, missing or null
/// fields come out as the absence marker, never an error.
pub fn clean_card_data(candidate: &CandidateFieldMap) -> CleanedRecord {
    let mut record = CleanedRecord::default();
    for field in CanonicalField::ALL {
        let raw = reconcile_field(field, candidate);
        record.set(field, raw.and_then(|value| normalize(field, value)));
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_korean_card() {
        let raw = "```json\n{\"name\":\"홍길동\",\"phone\":\"010-1234-5678\",\"email\":\"TEST@EXAMPLE.COM\",\"company\":null}\n```";
        let candidate = extract_candidate_map(raw).unwrap();
        let cleaned = clean_card_data(&candidate);
        let result = assemble(cleaned, 7, "cards/hong.jpg", None);

        assert_eq!(result.card_id, 7);
        assert_eq!(result.name.as_deref(), Some("홍길동"));
        assert_eq!(result.phone.as_deref(), Some("010-1234-5678"));
        assert_eq!(result.email.as_deref(), Some("test@example.com"));
        assert_eq!(result.company, None);
        assert_eq!(result.card_img_url, "cards/hong.jpg");
    }

    #[test]
    fn localized_keys_resolve_to_canonical_fields() {
        let raw = r#"{"이름": "김철수", "직책": "부장", "팩스": "02-123-4567"}"#;
        let candidate = extract_candidate_map(raw).unwrap();
        let cleaned = clean_card_data(&candidate);

        assert_eq!(cleaned.name.as_deref(), Some("김철수"));
        assert_eq!(cleaned.position.as_deref(), Some("부장"));
        assert_eq!(cleaned.fax.as_deref(), Some("02-123-4567"));
        assert_eq!(cleaned.email, None);
    }
}

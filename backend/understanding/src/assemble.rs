//! Result assembler: the last stage, fixing the output schema.

use cardlens_core::{CleanedRecord, FinalResult};

/// Assemble the fixed-shape final record for one card.
///
/// Every key of `FinalResult` is always present; fields absent in
/// `cleaned` stay `None` and serialize as JSON null rather than being
/// omitted. `profile_image_url` defaults to absent when the caller has
/// none.
pub fn assemble(
    cleaned: CleanedRecord,
    card_id: u64,
    image_ref: impl Into<String>,
    profile_image_ref: Option<String>,
) -> FinalResult {
    FinalResult {
        card_id,
        name: cleaned.name,
        phone: cleaned.phone,
        email: cleaned.email,
        profile_image_url: profile_image_ref,
        card_img_url: image_ref.into(),
        address: cleaned.address,
        fax: cleaned.fax,
        position: cleaned.position,
        company: cleaned.company,
        social_id: cleaned.social_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FINAL_KEYS: [&str; 11] = [
        "cardId",
        "name",
        "phone",
        "email",
        "profile_image_url",
        "card_img_url",
        "address",
        "fax",
        "position",
        "company",
        "social_id",
    ];

    #[test]
    fn all_eleven_keys_present_even_when_nothing_resolved() {
        let result = assemble(CleanedRecord::default(), 1, "card.jpg", None);
        let json = serde_json::to_value(&result).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), FINAL_KEYS.len());
        for key in FINAL_KEYS {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert!(object["name"].is_null());
        assert_eq!(object["cardId"], 1);
        assert_eq!(object["card_img_url"], "card.jpg");
    }

    #[test]
    fn profile_image_defaults_to_absent() {
        let result = assemble(CleanedRecord::default(), 2, "card.jpg", None);
        assert_eq!(result.profile_image_url, None);

        let with_profile = assemble(
            CleanedRecord::default(),
            2,
            "card.jpg",
            Some("profiles/2.png".into()),
        );
        assert_eq!(with_profile.profile_image_url.as_deref(), Some("profiles/2.png"));
    }

    #[test]
    fn cleaned_fields_carry_through_unchanged() {
        let cleaned = CleanedRecord {
            name: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            ..Default::default()
        };
        let result = assemble(cleaned, 3, "jane.jpg", None);
        assert_eq!(result.name.as_deref(), Some("Jane Doe"));
        assert_eq!(result.email.as_deref(), Some("jane@example.com"));
        assert_eq!(result.phone, None);
    }
}

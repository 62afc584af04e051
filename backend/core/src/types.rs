use std::fmt;

use serde::{Deserialize, Serialize};

/// The candidate mapping parsed out of a raw model response. Keys are
/// whatever the model chose (any language or spelling); values are
/// mixed-type JSON.
pub type CandidateFieldMap = serde_json::Map<String, serde_json::Value>;

/// The closed set of business-card attributes the pipeline normalizes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Name,
    Phone,
    Email,
    SocialId,
    Position,
    Company,
    Address,
    Fax,
}

impl CanonicalField {
    /// All canonical fields, in output order.
    pub const ALL: [CanonicalField; 8] = [
        CanonicalField::Name,
        CanonicalField::Phone,
        CanonicalField::Email,
        CanonicalField::SocialId,
        CanonicalField::Position,
        CanonicalField::Company,
        CanonicalField::Address,
        CanonicalField::Fax,
    ];

    /// Accepted source-key spellings for this field, highest priority
    /// first. The model may answer with localized key names despite
    /// prompt instructions; reconciliation probes these in order.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::Name => &["name", "이름", "성명"],
            CanonicalField::Phone => &["phone", "전화번호", "휴대폰", "연락처"],
            CanonicalField::Email => &["email", "이메일", "메일"],
            CanonicalField::SocialId => &["social_id", "카카오톡", "카톡", "sns"],
            CanonicalField::Position => &["position", "직위", "직책", "역할"],
            CanonicalField::Company => &["company", "회사", "기관", "업체"],
            CanonicalField::Address => &["address", "주소", "소재지"],
            CanonicalField::Fax => &["fax", "팩스", "팩시밀리"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Name => "name",
            CanonicalField::Phone => "phone",
            CanonicalField::Email => "email",
            CanonicalField::SocialId => "social_id",
            CanonicalField::Position => "position",
            CanonicalField::Company => "company",
            CanonicalField::Address => "address",
            CanonicalField::Fax => "fax",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized card data. Every canonical field is always present;
/// `None` is the explicit absence marker, distinct from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub social_id: Option<String>,
    pub position: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub fax: Option<String>,
}

impl CleanedRecord {
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        match field {
            CanonicalField::Name => self.name.as_deref(),
            CanonicalField::Phone => self.phone.as_deref(),
            CanonicalField::Email => self.email.as_deref(),
            CanonicalField::SocialId => self.social_id.as_deref(),
            CanonicalField::Position => self.position.as_deref(),
            CanonicalField::Company => self.company.as_deref(),
            CanonicalField::Address => self.address.as_deref(),
            CanonicalField::Fax => self.fax.as_deref(),
        }
    }

    pub fn set(&mut self, field: CanonicalField, value: Option<String>) {
        match field {
            CanonicalField::Name => self.name = value,
            CanonicalField::Phone => self.phone = value,
            CanonicalField::Email => self.email = value,
            CanonicalField::SocialId => self.social_id = value,
            CanonicalField::Position => self.position = value,
            CanonicalField::Company => self.company = value,
            CanonicalField::Address => self.address = value,
            CanonicalField::Fax => self.fax = value,
        }
    }
}

/// The final fixed-shape record for one processed card. All eleven keys
/// are always serialized; absent fields serialize as JSON null.
/// Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResult {
    #[serde(rename = "cardId")]
    pub card_id: u64,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub profile_image_url: Option<String>,
    pub card_img_url: String,
    pub address: Option<String>,
    pub fax: Option<String>,
    pub position: Option<String>,
    pub company: Option<String>,
    pub social_id: Option<String>,
}

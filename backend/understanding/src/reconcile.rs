//! Field reconciler: map model-chosen key spellings to canonical fields.
//!
//! A total function — absence is a valid outcome, never an error. The
//! alias tables live on `CanonicalField` as static ordered data.

use std::collections::BTreeMap;

use cardlens_core::{CandidateFieldMap, CanonicalField};
use serde_json::Value;

/// Canonical field to selected raw value (`None` when no alias matched).
pub type ReconciledMap<'a> = BTreeMap<CanonicalField, Option<&'a Value>>;

/// Resolve one canonical field against the candidate mapping.
///
/// Aliases are probed in priority order with exact, case-sensitive key
/// matching; the first alias present with a non-null value wins.
pub fn reconcile_field(field: CanonicalField, candidate: &CandidateFieldMap) -> Option<&Value> {
    field
        .aliases()
        .iter()
        .find_map(|alias| candidate.get(*alias).filter(|value| !value.is_null()))
}

/// Resolve every canonical field against the candidate mapping.
pub fn reconcile(candidate: &CandidateFieldMap) -> ReconciledMap<'_> {
    CanonicalField::ALL
        .into_iter()
        .map(|field| (field, reconcile_field(field, candidate)))
        .collect()
}

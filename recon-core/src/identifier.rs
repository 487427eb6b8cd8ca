//! Security identifier (ISIN-shaped) cleaning.
//!
//! Only the shape is checked: twelve characters drawn from `A-Z` and `0-9`.
//! The ISIN check digit is not verified.

use crate::error::NormalizeError;
use crate::patterns::IDENTIFIER;
use crate::value::{Identifier, RawValue};

/// Clean an identifier, returning `None` when it does not fit the pattern.
pub fn clean_identifier(raw: &RawValue) -> Option<Identifier> {
    let code = canonical_form(raw)?;
    IDENTIFIER
        .is_match(&code)
        .then(|| Identifier::new_unchecked(code))
}

/// Clean an identifier, failing with [`NormalizeError::InvalidIdentifier`]
/// when a present value does not fit the pattern. Missing input is still `Ok(None)`.
pub fn clean_identifier_strict(raw: &RawValue) -> Result<Option<Identifier>, NormalizeError> {
    let Some(code) = canonical_form(raw) else {
        return Ok(None);
    };
    if IDENTIFIER.is_match(&code) {
        Ok(Some(Identifier::new_unchecked(code)))
    } else {
        Err(NormalizeError::InvalidIdentifier { raw: raw.clone() })
    }
}

fn canonical_form(raw: &RawValue) -> Option<String> {
    let mut s = raw.to_text()?.trim().to_uppercase();
    s.retain(|c| c != ' ');
    if s.is_empty() { None } else { Some(s) }
}

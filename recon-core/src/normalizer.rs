//! The normalizer: one immutable config plus the five field cleaners.

use chrono::NaiveDateTime;

use crate::config::NormalizerConfig;
use crate::error::NormalizeError;
use crate::value::{Identifier, RawValue};
use crate::{amount, date, identifier, text, trans_num};

/// Stateless field cleaner. Holds its config by value and never mutates it,
/// so one instance can be shared across threads for a whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Free text (descriptions, payees, references).
    pub fn clean_text(&self, raw: &RawValue) -> Option<String> {
        text::clean_text(&self.config, raw)
    }

    /// Security identifier; out-of-pattern values become `None`.
    pub fn clean_identifier(&self, raw: &RawValue) -> Option<Identifier> {
        identifier::clean_identifier(raw)
    }

    /// Security identifier; out-of-pattern values are an error.
    pub fn clean_identifier_strict(
        &self,
        raw: &RawValue,
    ) -> Result<Option<Identifier>, NormalizeError> {
        identifier::clean_identifier_strict(raw)
    }

    /// Monetary amount, percentage or accounting negative.
    pub fn clean_amount(&self, raw: &RawValue) -> Option<f64> {
        amount::clean_amount(raw)
    }

    /// Non-negative whole transaction number.
    pub fn clean_trans_num(&self, raw: &RawValue) -> Option<u64> {
        trans_num::clean_trans_num(raw)
    }

    /// Best-effort timestamp; `None` is the not-a-time value.
    pub fn clean_date(&self, raw: &RawValue) -> Option<NaiveDateTime> {
        date::clean_date(raw)
    }
}

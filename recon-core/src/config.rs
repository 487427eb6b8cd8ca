//! Normalizer configuration.

use serde::{Deserialize, Serialize};

/// Flags controlling free-text cleaning.
///
/// Built once per cleaning session and copied into a [`Normalizer`](crate::Normalizer);
/// the normalizer never mutates it. Missing keys in a config file take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Replace runs of characters outside `[0-9A-Z ]` with a single space.
    pub drop_punctuation: bool,
    /// Replace runs of whitespace with a single space.
    pub collapse_whitespace: bool,
    /// Upper-case the text before punctuation is dropped.
    pub uppercase: bool,
    /// When false, every remaining space is removed.
    pub keep_spaces: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            drop_punctuation: true,
            collapse_whitespace: true,
            uppercase: true,
            keep_spaces: true,
        }
    }
}

impl NormalizerConfig {
    pub fn new(
        drop_punctuation: bool,
        collapse_whitespace: bool,
        uppercase: bool,
        keep_spaces: bool,
    ) -> Self {
        Self {
            drop_punctuation,
            collapse_whitespace,
            uppercase,
            keep_spaces,
        }
    }

    pub fn with_drop_punctuation(mut self, on: bool) -> Self {
        self.drop_punctuation = on;
        self
    }

    pub fn with_collapse_whitespace(mut self, on: bool) -> Self {
        self.collapse_whitespace = on;
        self
    }

    pub fn with_uppercase(mut self, on: bool) -> Self {
        self.uppercase = on;
        self
    }

    pub fn with_keep_spaces(mut self, on: bool) -> Self {
        self.keep_spaces = on;
        self
    }
}

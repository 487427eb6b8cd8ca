//! Free-text cleaning for descriptions, payees and labels.

use crate::config::NormalizerConfig;
use crate::patterns::{PUNCTUATION, WHITESPACE};
use crate::value::RawValue;

/// Clean free text according to `config`.
///
/// Stages run in a fixed order: trim, upper-case, collapse whitespace,
/// drop punctuation (then re-collapse and re-trim), drop spaces.
/// An empty result is `None`.
pub fn clean_text(config: &NormalizerConfig, raw: &RawValue) -> Option<String> {
    let rendered = raw.to_text()?;
    let mut s = rendered.trim().to_string();

    if config.uppercase {
        s = s.to_uppercase();
    }

    if config.collapse_whitespace {
        s = WHITESPACE.replace_all(&s, " ").into_owned();
    }

    if config.drop_punctuation {
        s = PUNCTUATION.replace_all(&s, " ").into_owned();
        s = WHITESPACE.replace_all(&s, " ").trim().to_string();
    }

    if !config.keep_spaces {
        s.retain(|c| c != ' ');
    }

    if s.is_empty() { None } else { Some(s) }
}

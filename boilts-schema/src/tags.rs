//! Field tag inspection.
//!
//! Tags are read the way SQLBoiler writes them: a backtick-wrapped run of
//! `key:"value"` fragments separated by single spaces. Only the `boil` key is
//! interpreted. The split is whitespace-naive, so a quoted value containing a
//! space is cut at the space; [`inspect_tag`] reports that case as a warning
//! without changing the extracted name.

use crate::types::FieldDeclaration;
use thiserror::Error;

/// Prefix of the token carrying the mapped column name.
pub const BOIL_PREFIX: &str = "boil:";

const TAG_DELIMITER: char = '`';
const QUOTE: char = '"';

/// Returns true if the field has a tag whose raw text contains `needle`.
///
/// This is a plain substring test, so a needle appearing inside an unrelated
/// key's value also matches.
#[must_use]
pub fn has_tag(field: &FieldDeclaration, needle: &str) -> bool {
    field.tag.as_deref().is_some_and(|tag| tag.contains(needle))
}

/// Extracts the mapped name from the field's `boil:"..."` tag fragment.
///
/// Returns `None` when the field has no tag or no token starts with `boil:`.
#[must_use]
pub fn extract_mapped_name(field: &FieldDeclaration) -> Option<String> {
    let tag = field.tag.as_deref()?;
    boil_token(tag).map(token_value)
}

/// Warning attached to a field whose tag did not read cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagWarning {
    /// The `boil:` value opens a quote it never closes, usually because the
    /// value contained a space.
    #[error("boil tag value {token} has unbalanced quotes")]
    UnbalancedQuotes {
        /// The token as split from the tag.
        token: String,
    },

    /// The tag mentions `boil:` but no space-separated token starts with it.
    #[error("tag mentions boil: but no token starts with it")]
    MissingBoilKey,
}

/// Result of [`inspect_tag`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagReport {
    /// Same value [`extract_mapped_name`] returns.
    pub mapped_name: Option<String>,
    /// Problem noticed while reading the tag, if any.
    pub warning: Option<TagWarning>,
}

/// Extracts the mapped name and reports malformed `boil` fragments.
#[must_use]
pub fn inspect_tag(field: &FieldDeclaration) -> TagReport {
    let Some(tag) = field.tag.as_deref() else {
        return TagReport::default();
    };

    match boil_token(tag) {
        Some(token) => {
            let raw = &token[BOIL_PREFIX.len()..];
            let unbalanced = raw.starts_with(QUOTE) && (raw.len() == 1 || !raw.ends_with(QUOTE));
            TagReport {
                mapped_name: Some(token_value(token)),
                warning: unbalanced.then(|| TagWarning::UnbalancedQuotes {
                    token: token.to_string(),
                }),
            }
        }
        None => TagReport {
            mapped_name: None,
            warning: tag.contains(BOIL_PREFIX).then_some(TagWarning::MissingBoilKey),
        },
    }
}

fn boil_token(tag: &str) -> Option<&str> {
    tag.trim_matches(TAG_DELIMITER)
        .split(' ')
        .find(|part| part.starts_with(BOIL_PREFIX))
}

fn token_value(token: &str) -> String {
    token[BOIL_PREFIX.len()..].trim_matches(QUOTE).to_string()
}

//! Normalization of SQLBoiler type names into canonical forms.
//!
//! Database-specific wrappers such as `null.String` or `types.Decimal` are
//! collapsed to a canonical name. Nullability survives only as a leading `*`.

use crate::imports::ImportSet;

/// Import identifier recorded for temporal types.
pub const TEMPORAL_IMPORT: &str = "time";

/// Canonical temporal type name.
pub const TEMPORAL_TYPE: &str = "time.Time";

/// Canonical name for loosely-typed values.
pub const ANY_TYPE: &str = "any";

/// Canonical name for fixed-precision decimals.
pub const DECIMAL_TYPE: &str = "float64";

/// Prefix marking a sequence-of type after normalization.
pub const SEQUENCE_MARKER: &str = "[]";

/// Prefix of nullable wrapper types.
pub const NULLABLE_PREFIX: &str = "null.";

const ARRAY_SUFFIX: &str = "array";

/// Maps a lower-cased alias to its canonical name.
fn canonical_alias(alias: &str) -> Option<&'static str> {
    match alias {
        "time" => Some(TEMPORAL_TYPE),
        "json" => Some(ANY_TYPE),
        "decimal" => Some(DECIMAL_TYPE),
        _ => None,
    }
}

/// Rewrites a formatted type name into its canonical form.
///
/// Rules, in order:
/// 1. a name containing `time` records [`TEMPORAL_IMPORT`] in `imports`;
/// 2. a dotted name collapses to its lower-cased second segment;
/// 3. known aliases map to canonical names;
/// 4. an `array` suffix (any case) becomes a `[]` prefix;
/// 5. a name that started with `null.` gains a leading `*`.
///
/// Rule 5 looks at `name` as given, not at the rewritten value.
pub fn normalize(name: &str, imports: &mut ImportSet) -> String {
    if name.contains(TEMPORAL_IMPORT) {
        imports.push(TEMPORAL_IMPORT);
    }

    let mut working = match name.split('.').nth(1) {
        Some(segment) => segment.to_lowercase(),
        None => name.to_string(),
    };

    if let Some(canonical) = canonical_alias(&working.to_lowercase()) {
        working = canonical.to_string();
    }

    if let Some(element) = strip_array_suffix(&working) {
        working = format!("{SEQUENCE_MARKER}{element}");
    }

    if name.starts_with(NULLABLE_PREFIX) {
        working.insert(0, '*');
    }

    working
}

fn strip_array_suffix(value: &str) -> Option<&str> {
    let split = value.len().checked_sub(ARRAY_SUFFIX.len())?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (element, suffix) = value.split_at(split);
    suffix.eq_ignore_ascii_case(ARRAY_SUFFIX).then_some(element)
}

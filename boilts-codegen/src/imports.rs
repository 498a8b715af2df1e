//! Auxiliary import tracking.

use serde::Serialize;

/// Ordered, append-only list of auxiliary imports required by a run.
///
/// Entries are not deduplicated: every normalization that needs an import
/// appends one. Concurrent units should each own a set and [`merge`] them in
/// input order once done.
///
/// [`merge`]: ImportSet::merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImportSet {
    entries: Vec<String>,
}

impl ImportSet {
    /// Creates an empty import set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an import identifier.
    pub fn push(&mut self, import: impl Into<String>) {
        self.entries.push(import.into());
    }

    /// Appends every entry of `other`, keeping order.
    pub fn merge(&mut self, other: ImportSet) {
        self.entries.extend(other.entries);
    }

    /// Number of recorded entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `import` was recorded at least once.
    #[must_use]
    pub fn contains(&self, import: &str) -> bool {
        self.entries.iter().any(|e| e == import)
    }

    /// Recorded entries in append order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// Distinct entries in order of first appearance.
    #[must_use]
    pub fn distinct(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !out.contains(&entry.as_str()) {
                out.push(entry);
            }
        }
        out
    }

    /// Iterates over recorded entries.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for ImportSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for ImportSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ImportSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

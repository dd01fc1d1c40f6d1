use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::LoadError;
use crate::models::{CatalogEntry, NOT_AVAILABLE};

/// Lowercases `title` and strips all whitespace
///
/// Idempotent: normalizing a normalized key returns it unchanged.
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercases `title` and trims it, keeping inner spaces
pub fn spaced_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Exact-match lookup from title keys to catalog rows
///
/// Holds two key sets: normalized keys (no whitespace) and space-preserving
/// lowercase keys. Each row appears at most once in each set; when two rows
/// share a key the lower row wins.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    normalized: HashMap<String, usize>,
    spaced: HashMap<String, usize>,
}

impl TitleIndex {
    /// Builds the index from catalog titles and the artifact's own key map
    ///
    /// Catalog titles are keyed first; rows with a missing title get no
    /// title key. Artifact keys are normalized and only fill in rows that have
    /// no key yet. Every artifact row must be in range.
    pub fn build(
        artifact_keys: &HashMap<String, usize>,
        entries: &[CatalogEntry],
    ) -> Result<Self, LoadError> {
        let len = entries.len();
        let mut extra: Vec<(usize, String)> = Vec::with_capacity(artifact_keys.len());
        for (key, &row) in artifact_keys {
            if row >= len {
                return Err(LoadError::IndexOutOfRange {
                    key: key.clone(),
                    row,
                    len,
                });
            }
            extra.push((row, normalize_title(key)));
        }
        extra.sort();

        let mut keyed = vec![false; len];
        let mut normalized = HashMap::with_capacity(len);
        let mut spaced = HashMap::with_capacity(len);

        for (row, entry) in entries.iter().enumerate() {
            if entry.title == NOT_AVAILABLE {
                continue;
            }
            if let Entry::Vacant(slot) = normalized.entry(normalize_title(&entry.title)) {
                slot.insert(row);
                keyed[row] = true;
            }
            spaced.entry(spaced_key(&entry.title)).or_insert(row);
        }

        for (row, key) in extra {
            if keyed[row] {
                continue;
            }
            if let Entry::Vacant(slot) = normalized.entry(key) {
                slot.insert(row);
                keyed[row] = true;
            }
        }

        Ok(Self { normalized, spaced })
    }

    /// Looks up an already-normalized key
    pub fn get_normalized(&self, key: &str) -> Option<usize> {
        self.normalized.get(key).copied()
    }

    /// Looks up a lowercase, space-preserving key
    pub fn get_spaced(&self, key: &str) -> Option<usize> {
        self.spaced.get(key).copied()
    }

    /// Number of normalized keys
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

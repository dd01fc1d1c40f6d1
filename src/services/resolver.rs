//! Title resolution
//!
//! Maps a user-typed title onto one catalog row. Strategies are tried in a
//! fixed order and the first hit wins:
//!
//! 1. exact match on the normalized key (lowercase, no whitespace)
//! 2. exact match on the lowercase key with spaces kept
//! 3. first row, in row order, whose title contains the query (case-insensitive)
//!
//! The substring step picks the first containing row, not the closest one,
//! and skips rows whose title is missing.

use crate::catalog::{normalize_title, spaced_key, Catalog};
use crate::models::NOT_AVAILABLE;

/// Which strategy produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Normalized,
    CaseInsensitive,
    Substring,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::Normalized => "normalized",
            MatchStrategy::CaseInsensitive => "case_insensitive",
            MatchStrategy::Substring => "substring",
        }
    }
}

/// A resolved catalog row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleMatch {
    pub row: usize,
    pub strategy: MatchStrategy,
}

/// Resolves `query` to a catalog row, or `None` if nothing matches
///
/// A blank query never matches.
pub fn resolve(query: &str, catalog: &Catalog) -> Option<TitleMatch> {
    if query.trim().is_empty() {
        return None;
    }

    let index = catalog.index();

    if let Some(row) = index.get_normalized(&normalize_title(query)) {
        return Some(TitleMatch {
            row,
            strategy: MatchStrategy::Normalized,
        });
    }

    if let Some(row) = index.get_spaced(&spaced_key(query)) {
        return Some(TitleMatch {
            row,
            strategy: MatchStrategy::CaseInsensitive,
        });
    }

    let lowered = query.to_lowercase();
    catalog
        .entries()
        .iter()
        .position(|entry| {
            entry.title != NOT_AVAILABLE && entry.title.to_lowercase().contains(&lowered)
        })
        .map(|row| {
            tracing::debug!(query = %query, row, "Resolved title by substring");
            TitleMatch {
                row,
                strategy: MatchStrategy::Substring,
            }
        })
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod catalog_entry;

pub use catalog_entry::{CatalogEntry, NOT_AVAILABLE};

/// Payload returned for a successful recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    /// Full metadata of the catalog row the query resolved to
    pub matched_entry: CatalogEntry,
    /// Titles of the most similar rows, most similar first (at most 10)
    pub recommendations: Vec<String>,
}

// ============================================================================
// Catalog Artifact Types
// ============================================================================

/// Decoded contents of the catalog artifact, before validation
///
/// `similarity` must be N×N where N is `catalog.len()`; `indices` maps a title
/// key to a row of both.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogBundle {
    pub similarity: Vec<Vec<f64>>,
    #[serde(default)]
    pub indices: HashMap<String, usize>,
    pub catalog: Vec<CatalogEntry>,
}

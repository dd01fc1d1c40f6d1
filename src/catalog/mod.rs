//! Read-only in-memory catalog
//!
//! A [`Catalog`] bundles the catalog rows, the pairwise [`SimilarityMatrix`]
//! and the [`TitleIndex`]. It is validated once when built and never mutated
//! afterwards, so it can be shared across request handlers without locking.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::models::{CatalogBundle, CatalogEntry};

pub mod artifact;
pub mod index;
pub mod matrix;
pub mod store;

pub use index::{normalize_title, spaced_key, TitleIndex};
pub use matrix::SimilarityMatrix;
pub use store::{CatalogSource, CatalogStore, FileCatalogSource};

/// Reasons a catalog artifact cannot be turned into a usable [`Catalog`]
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Failed to read catalog artifact {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decompress catalog artifact: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("Failed to decode catalog artifact: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Similarity matrix is not square: row {row} has {len} columns, expected {dim}")]
    NotSquare { row: usize, len: usize, dim: usize },

    #[error("Similarity matrix dimension {matrix} does not match catalog size {catalog}")]
    DimensionMismatch { matrix: usize, catalog: usize },

    #[error("Title index key {key:?} points to row {row}, catalog has {len} rows")]
    IndexOutOfRange { key: String, row: usize, len: usize },

    #[error("Similarity matrix has a non-finite score at ({row}, {col})")]
    NonFiniteScore { row: usize, col: usize },

    #[error("Catalog loader task failed: {0}")]
    Worker(String),

    #[error("No catalog source configured")]
    NoSource,
}

/// Validated catalog: entries, similarity scores and title lookup
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    similarity: SimilarityMatrix,
    index: TitleIndex,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Validates a decoded artifact and builds the catalog from it
    ///
    /// Fails if the matrix is not N×N for N catalog rows or if any index
    /// entry points outside the catalog. Nothing is returned on failure.
    pub fn from_bundle(bundle: CatalogBundle) -> Result<Self, LoadError> {
        let CatalogBundle {
            similarity,
            indices,
            catalog,
        } = bundle;

        let similarity = SimilarityMatrix::from_rows(similarity)?;
        if similarity.dim() != catalog.len() {
            return Err(LoadError::DimensionMismatch {
                matrix: similarity.dim(),
                catalog: catalog.len(),
            });
        }

        let index = TitleIndex::build(&indices, &catalog)?;

        Ok(Self {
            entries: catalog,
            similarity,
            index,
            loaded_at: Utc::now(),
        })
    }

    /// Number of catalog rows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All rows in row-index order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entry(&self, row: usize) -> Option<&CatalogEntry> {
        self.entries.get(row)
    }

    pub fn title(&self, row: usize) -> Option<&str> {
        self.entries.get(row).map(|entry| entry.title.as_str())
    }

    /// Similarity scores of `row` against every row, indexed by row
    pub fn similarity_row(&self, row: usize) -> Option<&[f64]> {
        self.similarity.row(row)
    }

    pub fn index(&self) -> &TitleIndex {
        &self.index
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

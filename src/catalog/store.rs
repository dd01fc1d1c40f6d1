use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use tokio::sync::Mutex;

use super::{artifact, Catalog, LoadError};

/// Where a catalog comes from
///
/// The store calls [`CatalogSource::load`] until one call succeeds and never
/// again afterwards.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Produces a fully validated catalog
    async fn load(&self) -> Result<Catalog, LoadError>;

    /// Source description for logging
    fn describe(&self) -> String;
}

/// Loads the catalog from a zstd-compressed JSON artifact on disk
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> Result<Catalog, LoadError> {
        let path = self.path.clone();
        // Decompression and decoding are CPU-bound; keep them off the runtime threads
        tokio::task::spawn_blocking(move || artifact::load_catalog(&path))
            .await
            .map_err(|e| LoadError::Worker(e.to_string()))?
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Lazily-initialized, process-wide catalog
///
/// Concurrent first callers wait on a single load attempt and share its
/// outcome, failure included. A successful load is kept for the lifetime of
/// the store and read without locking; a failed one is not cached, so a call
/// made after the attempt finished tries again.
pub struct CatalogStore {
    source: Option<Box<dyn CatalogSource>>,
    catalog: OnceLock<Arc<Catalog>>,
    /// Held for the whole of a load attempt; keeps the latest failure
    last_error: Mutex<Option<Arc<LoadError>>>,
    /// Count of failed attempts, bumped while `last_error` is locked
    failures: AtomicU64,
}

impl CatalogStore {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            catalog: OnceLock::new(),
            last_error: Mutex::new(None),
            failures: AtomicU64::new(0),
        }
    }

    /// Store backed by the artifact at `path`
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileCatalogSource::new(path))
    }

    /// Store that already holds `catalog` and has no source
    pub fn preloaded(catalog: Catalog) -> Self {
        Self {
            source: None,
            catalog: OnceLock::from(Arc::new(catalog)),
            last_error: Mutex::new(None),
            failures: AtomicU64::new(0),
        }
    }

    /// Returns the catalog, loading it on first use
    pub async fn load(&self) -> Result<Arc<Catalog>, Arc<LoadError>> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(Arc::clone(catalog));
        }

        let failures_seen = self.failures.load(Ordering::Acquire);
        let mut last_error = self.last_error.lock().await;

        if let Some(catalog) = self.catalog.get() {
            return Ok(Arc::clone(catalog));
        }
        // An attempt failed while we were waiting: share its error
        if self.failures.load(Ordering::Acquire) != failures_seen {
            if let Some(error) = last_error.as_ref() {
                return Err(Arc::clone(error));
            }
        }

        match self.load_from_source().await {
            Ok(catalog) => {
                *last_error = None;
                Ok(Arc::clone(self.catalog.get_or_init(|| Arc::new(catalog))))
            }
            Err(e) => {
                let error = Arc::new(e);
                *last_error = Some(Arc::clone(&error));
                self.failures.fetch_add(1, Ordering::Release);
                Err(error)
            }
        }
    }

    /// Returns the catalog only if it has already been loaded
    pub fn get(&self) -> Option<Arc<Catalog>> {
        self.catalog.get().cloned()
    }

    async fn load_from_source(&self) -> Result<Catalog, LoadError> {
        let source = self.source.as_ref().ok_or(LoadError::NoSource)?;
        let description = source.describe();
        let started = Instant::now();
        tracing::info!(source = %description, "Loading catalog");

        match source.load().await {
            Ok(catalog) => {
                tracing::info!(
                    source = %description,
                    entries = catalog.len(),
                    indexed_titles = catalog.index().len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Catalog loaded"
                );
                Ok(catalog)
            }
            Err(e) => {
                tracing::error!(source = %description, error = %e, "Catalog load failed");
                Err(e)
            }
        }
    }
}

use std::sync::Arc;

use crate::{
    catalog::{Catalog, CatalogStore},
    error::{AppError, AppResult},
    models::RecommendationResult,
    services::{ranking, resolver},
};

/// Resolves a free-text title and returns the titles most similar to it
///
/// Cheap to clone; every clone shares the same catalog store.
#[derive(Clone)]
pub struct RecommendationService {
    store: Arc<CatalogStore>,
}

impl RecommendationService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Generates recommendations for `query`
    ///
    /// Blank queries are rejected before the catalog is touched. A catalog
    /// that fails to load surfaces as [`AppError::CatalogUnavailable`].
    pub async fn recommend(&self, query: &str) -> AppResult<RecommendationResult> {
        if query.trim().is_empty() {
            return Err(AppError::EmptyQuery);
        }

        let catalog = self.store.load().await?;
        recommend_from(&catalog, query)
    }
}

/// Resolves `query` against `catalog` and assembles the result payload
pub fn recommend_from(catalog: &Catalog, query: &str) -> AppResult<RecommendationResult> {
    if query.trim().is_empty() {
        return Err(AppError::EmptyQuery);
    }

    let matched = resolver::resolve(query, catalog)
        .ok_or_else(|| AppError::NotFound(query.to_string()))?;

    let matched_entry = catalog.entry(matched.row).cloned().ok_or_else(|| {
        AppError::Internal(format!("Resolved row {} is not in the catalog", matched.row))
    })?;

    let ranked = ranking::rank(matched.row, catalog).ok_or_else(|| {
        AppError::Internal(format!("No similarity row for catalog row {}", matched.row))
    })?;

    let recommendations = ranked
        .into_iter()
        .map(|row| {
            catalog.title(row).map(str::to_owned).ok_or_else(|| {
                AppError::Internal(format!("Ranked row {} is not in the catalog", row))
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    tracing::info!(
        query = %query,
        row = matched.row,
        strategy = matched.strategy.as_str(),
        matched_title = %matched_entry.title,
        count = recommendations.len(),
        "Generated recommendations"
    );

    Ok(RecommendationResult {
        matched_entry,
        recommendations,
    })
}

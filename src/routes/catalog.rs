use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct CatalogStatus {
    pub loaded: bool,
    pub entries: Option<usize>,
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Reports whether the catalog is loaded, without triggering a load
pub async fn status(State(state): State<AppState>) -> Json<CatalogStatus> {
    let catalog = state.recommendations.store().get();

    Json(CatalogStatus {
        loaded: catalog.is_some(),
        entries: catalog.as_ref().map(|c| c.len()),
        loaded_at: catalog.as_ref().map(|c| c.loaded_at()),
    })
}

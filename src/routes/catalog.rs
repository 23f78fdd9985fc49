use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct CatalogInfo {
    pub provider: &'static str,
    pub entries: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Handler describing the loaded catalog
pub async fn info(State(state): State<Arc<AppState>>) -> Json<CatalogInfo> {
    let catalog = state.recommender.catalog();
    Json(CatalogInfo {
        provider: state.provider,
        entries: catalog.len(),
        loaded_at: catalog.loaded_at(),
    })
}

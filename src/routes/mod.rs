use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::recommendations::Recommender,
};

pub mod catalog;
pub mod recommendations;
pub mod titles;

/// Shared, read-only application state
pub struct AppState {
    pub recommender: Arc<Recommender>,
    /// Name of the provider the catalog was loaded from
    pub provider: &'static str,
}

impl AppState {
    pub fn new(recommender: Recommender, provider: &'static str) -> Self {
        Self {
            recommender: Arc::new(recommender),
            provider,
        }
    }
}

/// Extracts the required `q` search parameter
///
/// Declared optional on the query structs so a missing value gets the JSON
/// error body instead of axum's plain-text rejection.
pub(crate) fn required_query(q: Option<&str>) -> AppResult<&str> {
    q.ok_or_else(|| AppError::InvalidInput("missing query parameter 'q'".to_string()))
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", get(recommendations::recommend))
        .route("/titles/resolve", get(titles::resolve))
        .route("/catalog", get(catalog::info))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{ResultRow, SearchOutcome},
    routes::{required_query, AppState},
    services::ranker::RankingConfig,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    q: Option<String>,
    threshold: Option<f64>,
    top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub resolved_title: String,
    pub results: Vec<ResultRow>,
}

impl RecommendationQuery {
    /// Applies per-request overrides on top of the configured ranking
    fn ranking(&self, default: &RankingConfig) -> AppResult<RankingConfig> {
        let threshold = self.threshold.unwrap_or(default.threshold);
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(AppError::InvalidInput(
                "threshold must be a non-negative number".to_string(),
            ));
        }

        if self.top_n == Some(0) {
            return Err(AppError::InvalidInput(
                "top_n must be at least 1".to_string(),
            ));
        }

        Ok(RankingConfig {
            threshold,
            top_n: self.top_n.or(default.top_n),
        })
    }
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let query = required_query(params.q.as_deref())?;
    let ranking = params.ranking(state.recommender.ranking())?;

    tracing::info!(
        request_id = %request_id,
        query = %query,
        threshold = ranking.threshold,
        top_n = ?ranking.top_n,
        "Processing recommendation request"
    );

    match state.recommender.search_with(query, &ranking)? {
        SearchOutcome::Found {
            resolved_title,
            results,
        } => Ok(Json(RecommendationResponse {
            resolved_title,
            results,
        })),
        SearchOutcome::NotFound => Err(AppError::NotFound(format!(
            "No recommendations found for '{}'; try refining the title",
            query
        ))),
    }
}

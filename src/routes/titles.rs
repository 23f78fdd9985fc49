use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::MatchResult,
    routes::{required_query, AppState},
};

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolvedTitle {
    pub index: usize,
    pub title: String,
    pub matched_title: String,
}

/// Handler for title resolution endpoint
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> AppResult<Json<ResolvedTitle>> {
    let query = required_query(params.q.as_deref())?;
    let MatchResult::Resolved {
        index,
        matched_title,
    } = state.recommender.resolve(query)
    else {
        return Err(AppError::NotFound(format!(
            "No title matches '{}'",
            query
        )));
    };

    let entry = state
        .recommender
        .catalog()
        .entry(index)
        .ok_or_else(|| AppError::Internal(format!("resolved index {} is not in the catalog", index)))?;

    Ok(Json(ResolvedTitle {
        index,
        title: entry.title.clone(),
        matched_title,
    }))
}

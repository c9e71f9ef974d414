use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::RecommendationResponse,
    services::{attach_covers, recommend},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default)]
    pub title: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Book recommendations for a movie title.
///
/// Every query outcome, including an unknown movie, is a 200 response with an
/// `outcome` tag. Only a missing or blank title is rejected.
pub async fn recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let title = params.title.unwrap_or_default();
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Query parameter 'title' cannot be empty".to_string(),
        ));
    }

    let mut response = recommend(&state.catalog, &state.mapping, &title).to_response(&title);

    attach_covers(
        state.covers.clone(),
        &mut response.recommendations,
        state.cover_timeout,
    )
    .await;

    Ok(Json(response))
}

/// The movie genre → book genres table
pub async fn genres(State(state): State<AppState>) -> Json<BTreeMap<String, Vec<String>>> {
    let table = state
        .mapping
        .entries()
        .map(|(movie, books)| (movie.to_string(), books.to_vec()))
        .collect();
    Json(table)
}

//! Episode listing and detail endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use podcastr_common::EpisodeSummary;
use tracing::debug;

use super::{api_error, ApiError};
use crate::catalog::HomeListing;
use crate::AppState;

/// GET /api/episodes - latest releases and all other episodes
pub async fn home_listing(State(state): State<AppState>) -> Json<HomeListing> {
    Json(state.catalog.home())
}

/// GET /api/episodes/:slug - one episode with its description
pub async fn episode_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EpisodeSummary>, ApiError> {
    match state.catalog.find(&slug) {
        Some(summary) => Ok(Json(summary.clone())),
        None => {
            debug!("Episode {} not found", slug);
            Err(api_error(
                StatusCode::NOT_FOUND,
                format!("episode {} not found", slug),
            ))
        }
    }
}

//! HTTP API handlers for podcastr-player

pub mod episodes;
pub mod health;
pub mod player;
pub mod sse;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::AppState;

pub use health::health_routes;

/// Error body returned by failing handlers
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Handler error: status code plus a JSON message
pub type ApiError = (StatusCode, Json<StatusResponse>);

pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(StatusResponse {
            status: format!("error: {}", message.into()),
        }),
    )
}

/// Routes mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Episode catalog
        .route("/episodes", get(episodes::home_listing))
        .route("/episodes/:slug", get(episodes::episode_detail))

        // Player session
        .route("/player", get(player::get_session))
        .route("/player/play", post(player::play))
        .route("/player/play-list", post(player::play_list))
        .route("/player/toggle", post(player::toggle_play))
        .route("/player/playing", post(player::set_playing))
        .route("/player/loop", post(player::toggle_loop))
        .route("/player/shuffle", post(player::toggle_shuffle))
        .route("/player/next", post(player::play_next))
        .route("/player/previous", post(player::play_previous))
        .route("/player/clear", post(player::clear))

        // Audio element signals
        .route("/player/seek", post(player::seek))
        .route("/player/progress", post(player::progress))
        .route("/player/metadata", post(player::metadata_loaded))
        .route("/player/ended", post(player::ended))

        // SSE event stream
        .route("/events", get(sse::event_stream))
}

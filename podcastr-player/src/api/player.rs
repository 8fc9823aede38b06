//! Player session endpoints
//!
//! Page views enqueue playback, the player bar drives the controls, and the
//! audio element's signals are relayed back here. Every endpoint answers
//! with the session snapshot after the operation.

use axum::{extract::State, http::StatusCode, Json};
use podcastr_common::SessionSnapshot;
use serde::Deserialize;
use tracing::info;

use super::{api_error, ApiError};
use crate::error::Error;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayListRequest {
    /// Index into the home playlist
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct PlayingRequest {
    pub playing: bool,
}

#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    /// Seconds
    pub position: f64,
}

#[derive(Debug, Deserialize)]
pub struct MetadataRequest {
    /// Seconds
    pub duration: f64,
}

/// GET /api/player
pub async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.controller.snapshot().await)
}

/// POST /api/player/play - play one episode on its own (detail page)
pub async fn play(
    State(state): State<AppState>,
    Json(req): Json<PlayRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let Some(summary) = state.catalog.find(&req.slug) else {
        let err = Error::EpisodeNotFound(req.slug);
        return Err(api_error(StatusCode::NOT_FOUND, err.to_string()));
    };

    info!("Playing episode {}", summary.episode.id);
    Ok(Json(
        state.controller.play_single(summary.episode.clone()).await,
    ))
}

/// POST /api/player/play-list - play the home playlist from `index`
pub async fn play_list(
    State(state): State<AppState>,
    Json(req): Json<PlayListRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let playlist = state.catalog.playlist();
    if req.index >= playlist.len() {
        let err = Error::InvalidIndex {
            index: req.index,
            len: playlist.len(),
        };
        return Err(api_error(StatusCode::BAD_REQUEST, err.to_string()));
    }

    info!(
        "Playing playlist of {} episodes from index {}",
        playlist.len(),
        req.index
    );
    Ok(Json(
        state.controller.play_from_list(playlist, req.index).await,
    ))
}

/// POST /api/player/toggle
pub async fn toggle_play(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.controller.toggle_play().await)
}

/// POST /api/player/playing - play/pause echo from the audio element
pub async fn set_playing(
    State(state): State<AppState>,
    Json(req): Json<PlayingRequest>,
) -> Json<SessionSnapshot> {
    Json(state.controller.set_playing_state(req.playing).await)
}

/// POST /api/player/loop
pub async fn toggle_loop(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.controller.toggle_loop().await)
}

/// POST /api/player/shuffle
pub async fn toggle_shuffle(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.controller.toggle_shuffle().await)
}

/// POST /api/player/next
pub async fn play_next(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.controller.play_next().await)
}

/// POST /api/player/previous
pub async fn play_previous(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.controller.play_previous().await)
}

/// POST /api/player/clear
pub async fn clear(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.controller.clear_player_state().await)
}

/// POST /api/player/seek - user dragged the progress slider
pub async fn seek(
    State(state): State<AppState>,
    Json(req): Json<PositionRequest>,
) -> Json<SessionSnapshot> {
    Json(state.controller.seek(req.position).await)
}

/// POST /api/player/progress - time-update signal
pub async fn progress(
    State(state): State<AppState>,
    Json(req): Json<PositionRequest>,
) -> Json<SessionSnapshot> {
    Json(state.controller.on_progress_tick(req.position).await)
}

/// POST /api/player/metadata - loaded-metadata signal with the real duration
pub async fn metadata_loaded(
    State(state): State<AppState>,
    Json(req): Json<MetadataRequest>,
) -> Json<SessionSnapshot> {
    Json(state.controller.on_metadata_loaded(req.duration).await)
}

/// POST /api/player/ended - ended signal
pub async fn ended(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.controller.on_episode_ended().await)
}

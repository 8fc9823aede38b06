//! # Podcastr Player Library (podcastr-player)
//!
//! Episode listing service with a persistent player session.
//!
//! **Purpose:** Serve the episode catalog and own the one process-wide
//! playback session that every page view and the player bar share.
//!
//! **Architecture:** `PlayerController` (shared store over the
//! `PlaybackSession` state machine) behind an axum HTTP API, with state
//! changes pushed to observers over SSE.

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod playback;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use playback::PlayerController;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The one player session of this process
    pub controller: Arc<PlayerController>,
    /// Read-only episode catalog
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(controller: Arc<PlayerController>, catalog: Arc<Catalog>) -> Self {
        Self {
            controller,
            catalog,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .nest("/api", api::api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

//! Server-Sent Events (SSE) stream of player events

use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use podcastr_common::PlayerEvent;
use std::convert::Infallible;

use crate::AppState;

/// GET /api/events - SSE event stream
///
/// Sends `InitialState` with the current session first, then every player
/// event as it happens.
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (snapshot, rx) = state.controller.subscribe_with_snapshot().await;

    let initial = PlayerEvent::InitialState {
        snapshot,
        timestamp: chrono::Utc::now(),
    };

    podcastr_common::sse::create_event_sse_stream("podcastr-player", initial, rx)
}

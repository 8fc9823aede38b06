//! Server-Sent Events (SSE) utilities
//!
//! Turns an EventBus subscription into an SSE stream.

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::events::PlayerEvent;

/// Keep-alive interval for idle SSE connections
pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Convert a player event to an SSE event
///
/// The SSE `event:` field carries the variant name and the data is the JSON
/// encoding of the event. Returns None if serialization fails.
pub fn to_sse_event(event: &PlayerEvent) -> Option<Event> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Event::default().event(event.event_type()).data(json)),
        Err(e) => {
            warn!("Failed to serialize event: {}", e);
            None
        }
    }
}

/// Create an SSE stream from an event subscription
///
/// `initial` is sent first (typically `PlayerEvent::InitialState`), followed
/// by every event received on `rx`. Lagged receivers skip the dropped events
/// and continue; the stream ends when the bus is closed.
pub fn create_event_sse_stream(
    service_name: &'static str,
    initial: PlayerEvent,
    mut rx: broadcast::Receiver<PlayerEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("New SSE client connected to {} events", service_name);

    let stream = async_stream::stream! {
        if let Some(event) = to_sse_event(&initial) {
            yield Ok(event);
        }

        loop {
            match rx.recv().await {
                Ok(event) => {
                    debug!("Broadcasting SSE event: {}", event.event_type());
                    if let Some(sse_event) = to_sse_event(&event) {
                        yield Ok(sse_event);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("SSE client lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => {
                    info!("SSE: {} event bus closed", service_name);
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(KEEP_ALIVE_INTERVAL)
            .text("keep-alive"),
    )
}

//! Event types for the Podcastr event system
//!
//! Provides the player event definitions and the EventBus used to deliver
//! them to every observer (SSE clients, tests, in-process subscribers).

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::episode::Episode;

/// Coarse player state derived from the session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    /// Nothing loaded
    Empty,
    /// An episode is loaded but not playing
    Paused,
    /// An episode is loaded and playing
    Playing,
}

impl std::fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerStatus::Empty => write!(f, "empty"),
            PlayerStatus::Paused => write!(f, "paused"),
            PlayerStatus::Playing => write!(f, "playing"),
        }
    }
}

/// Immutable view of the playback session
///
/// Handed to observers on every change so the rendering layer can redraw
/// the progress bar, the enabled state of the navigation buttons and the
/// loop/shuffle toggles without reaching into the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub queue: Vec<Episode>,
    pub current_index: Option<usize>,
    pub current_episode: Option<Episode>,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
    pub progress_seconds: f64,
    pub duration_seconds: f64,
    pub has_next: bool,
    pub has_previous: bool,
    pub status: PlayerStatus,
}

/// Player event types
///
/// Events are broadcast via EventBus and serialized for SSE transmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerEvent {
    /// Full state sent once when an observer connects
    InitialState {
        snapshot: SessionSnapshot,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Session changed; carries the full state after the change
    ///
    /// Emitted after every effective mutation, including progress ticks.
    /// No-op operations emit nothing.
    SessionChanged {
        snapshot: SessionSnapshot,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Derived status changed (Empty / Paused / Playing)
    PlaybackStateChanged {
        old_state: PlayerStatus,
        new_state: PlayerStatus,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Selected episode changed
    ///
    /// The rendering layer swaps the audio element's source on this event.
    /// `episode` is None when the queue was cleared.
    EpisodeChanged {
        episode: Option<Episode>,
        index: Option<usize>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The audio element should jump to `position_seconds`
    SeekRequested {
        position_seconds: f64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl PlayerEvent {
    /// Variant name, used as the SSE `event:` field
    pub fn event_type(&self) -> &'static str {
        match self {
            PlayerEvent::InitialState { .. } => "InitialState",
            PlayerEvent::SessionChanged { .. } => "SessionChanged",
            PlayerEvent::PlaybackStateChanged { .. } => "PlaybackStateChanged",
            PlayerEvent::EpisodeChanged { .. } => "EpisodeChanged",
            PlayerEvent::SeekRequested { .. } => "SeekRequested",
        }
    }
}

// ========================================
// EventBus Implementation
// ========================================

/// Broadcast channel for player events
///
/// Publishing never blocks; a subscriber that falls more than `capacity`
/// events behind skips the oldest ones.
///
/// # Examples
///
/// ```
/// use podcastr_common::events::{EventBus, PlayerEvent, PlayerStatus};
///
/// let event_bus = EventBus::new(100);
/// let mut rx = event_bus.subscribe();
///
/// event_bus.emit_lossy(PlayerEvent::PlaybackStateChanged {
///     old_state: PlayerStatus::Paused,
///     new_state: PlayerStatus::Playing,
///     timestamp: chrono::Utc::now(),
/// });
///
/// assert!(rx.try_recv().is_ok());
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PlayerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: PlayerEvent) {
        let _ = self.tx.send(event);
    }
}

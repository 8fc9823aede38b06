//! Player State Controller
//!
//! Single source of truth for what is playing and how. All mutation goes
//! through the named operations below; each one runs under the write lock,
//! and its notifications are emitted before the lock is released so every
//! observer sees changes in the order they happened.
//!
//! The controller never touches the audio element. It publishes state, plus
//! `SeekRequested` as its one outbound instruction, and receives the
//! element's signals through `on_progress_tick`, `on_metadata_loaded`,
//! `on_episode_ended` and `set_playing_state`.

use chrono::Utc;
use podcastr_common::{Episode, EventBus, PlayerEvent, SessionSnapshot};
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::session::{EndedOutcome, PlaybackSession};

/// Shared playback store
pub struct PlayerController {
    session: RwLock<PlaybackSession>,
    event_bus: EventBus,
}

impl PlayerController {
    /// Create a controller with an empty session
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            session: RwLock::new(PlaybackSession::new()),
            event_bus,
        }
    }

    /// Subscribe to future events
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.event_bus.subscribe()
    }

    /// Subscribe together with the current state
    ///
    /// No event can be emitted between the snapshot and the subscription,
    /// so the receiver picks up exactly where the snapshot leaves off.
    pub async fn subscribe_with_snapshot(
        &self,
    ) -> (SessionSnapshot, broadcast::Receiver<PlayerEvent>) {
        let session = self.session.read().await;
        let rx = self.event_bus.subscribe();
        (session.snapshot(), rx)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.read().await.snapshot()
    }

    pub async fn play_single(&self, episode: Episode) -> SessionSnapshot {
        self.apply("play_single", |s| s.play_single(episode)).await.1
    }

    /// # Panics
    ///
    /// Panics if `index >= list.len()`.
    pub async fn play_from_list(&self, list: Vec<Episode>, index: usize) -> SessionSnapshot {
        self.apply("play_from_list", |s| s.play_from_list(list, index))
            .await
            .1
    }

    pub async fn toggle_play(&self) -> SessionSnapshot {
        self.apply("toggle_play", |s| s.toggle_play()).await.1
    }

    pub async fn set_playing_state(&self, playing: bool) -> SessionSnapshot {
        self.apply("set_playing_state", |s| s.set_playing_state(playing))
            .await
            .1
    }

    pub async fn toggle_loop(&self) -> SessionSnapshot {
        self.apply("toggle_loop", |s| s.toggle_loop()).await.1
    }

    pub async fn toggle_shuffle(&self) -> SessionSnapshot {
        self.apply("toggle_shuffle", |s| s.toggle_shuffle()).await.1
    }

    pub async fn play_next(&self) -> SessionSnapshot {
        self.apply("play_next", |s| s.play_next()).await.1
    }

    pub async fn play_previous(&self) -> SessionSnapshot {
        self.apply("play_previous", |s| s.play_previous()).await.1
    }

    pub async fn clear_player_state(&self) -> SessionSnapshot {
        self.apply("clear_player_state", |s| s.clear_player_state())
            .await
            .1
    }

    pub async fn has_next(&self) -> bool {
        self.session.read().await.has_next()
    }

    pub async fn has_previous(&self) -> bool {
        self.session.read().await.has_previous()
    }

    /// Move the playhead and ask the audio element to follow
    pub async fn seek(&self, position_seconds: f64) -> SessionSnapshot {
        let mut session = self.session.write().await;
        let before = session.snapshot();

        let applied = session.seek(position_seconds);
        let after = session.snapshot();
        self.publish("seek", &before, &after);

        if let Some(position_seconds) = applied {
            self.event_bus.emit_lossy(PlayerEvent::SeekRequested {
                position_seconds,
                timestamp: Utc::now(),
            });
        }
        after
    }

    pub async fn on_progress_tick(&self, position_seconds: f64) -> SessionSnapshot {
        self.apply("on_progress_tick", |s| s.on_progress_tick(position_seconds))
            .await
            .1
    }

    pub async fn on_metadata_loaded(&self, duration_seconds: f64) -> SessionSnapshot {
        self.apply("on_metadata_loaded", |s| s.on_metadata_loaded(duration_seconds))
            .await
            .1
    }

    pub async fn on_episode_ended(&self) -> SessionSnapshot {
        let (outcome, snapshot) = self
            .apply("on_episode_ended", |s| s.on_episode_ended())
            .await;
        match outcome {
            EndedOutcome::Advanced => debug!(
                "Episode ended, advanced to index {:?}",
                snapshot.current_index
            ),
            EndedOutcome::Cleared => debug!("Episode ended with no next episode, cleared"),
        }
        snapshot
    }

    async fn apply<R>(
        &self,
        operation: &str,
        f: impl FnOnce(&mut PlaybackSession) -> R,
    ) -> (R, SessionSnapshot) {
        let mut session = self.session.write().await;
        let before = session.snapshot();

        let result = f(&mut *session);

        let after = session.snapshot();
        self.publish(operation, &before, &after);
        (result, after)
    }

    /// Emit notifications for the difference between two snapshots
    fn publish(&self, operation: &str, before: &SessionSnapshot, after: &SessionSnapshot) {
        if before == after {
            debug!("{}: no change", operation);
            return;
        }

        debug!(
            "{}: status {} -> {}, index {:?} -> {:?}",
            operation, before.status, after.status, before.current_index, after.current_index
        );

        let timestamp = Utc::now();

        self.event_bus.emit_lossy(PlayerEvent::SessionChanged {
            snapshot: after.clone(),
            timestamp,
        });

        if before.current_index != after.current_index
            || before.current_episode != after.current_episode
        {
            self.event_bus.emit_lossy(PlayerEvent::EpisodeChanged {
                episode: after.current_episode.clone(),
                index: after.current_index,
                timestamp,
            });
        }

        if before.status != after.status {
            self.event_bus.emit_lossy(PlayerEvent::PlaybackStateChanged {
                old_state: before.status,
                new_state: after.status,
                timestamp,
            });
        }
    }
}

//! Playback session state machine
//!
//! `PlaybackSession` holds what is playing and how, and implements every
//! transition of the player. It is synchronous and knows nothing about
//! observers; `PlayerController` wraps it for shared access and change
//! notification.
//!
//! States: Empty (no queue), Loaded-Paused, Loaded-Playing.
//!
//! Invariants maintained by every transition:
//! - `current_index` is None iff the queue is empty, otherwise in bounds
//! - `is_playing` implies a non-empty queue
//! - `progress_seconds` stays within `[0, duration_seconds]` (upper bound
//!   only when the duration is known) and resets to 0 when the episode
//!   changes

use podcastr_common::{Episode, PlayerStatus, SessionSnapshot};

/// What the ended signal did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndedOutcome {
    /// Moved on to the next episode in the queue
    Advanced,
    /// No next episode; the session was cleared
    Cleared,
}

/// Process-wide playback state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackSession {
    queue: Vec<Episode>,
    current_index: Option<usize>,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
    progress_seconds: f64,
    /// Catalog duration until the audio element reports the real one
    duration_seconds: f64,
}

impl PlaybackSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self) -> &[Episode] {
        &self.queue
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.current_index.and_then(|i| self.queue.get(i))
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    pub fn progress_seconds(&self) -> f64 {
        self.progress_seconds
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// True when a later episode exists in the queue
    pub fn has_next(&self) -> bool {
        match self.current_index {
            Some(i) => i + 1 < self.queue.len(),
            None => false,
        }
    }

    /// True when an earlier episode exists in the queue
    pub fn has_previous(&self) -> bool {
        matches!(self.current_index, Some(i) if i > 0)
    }

    pub fn status(&self) -> PlayerStatus {
        if self.current_episode().is_none() {
            PlayerStatus::Empty
        } else if self.is_playing {
            PlayerStatus::Playing
        } else {
            PlayerStatus::Paused
        }
    }

    /// Replace the queue with a single episode and start playing it
    pub fn play_single(&mut self, episode: Episode) {
        self.queue = vec![episode];
        self.load(0);
        self.is_playing = true;
    }

    /// Replace the queue with `list` and start playing at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= list.len()`. Callers holding untrusted input must
    /// validate the index first.
    pub fn play_from_list(&mut self, list: Vec<Episode>, index: usize) {
        assert!(
            index < list.len(),
            "play_from_list: index {} out of range for list of {} episodes",
            index,
            list.len()
        );

        self.queue = list;
        self.load(index);
        self.is_playing = true;
    }

    /// Flip the playing flag; returns the new value
    ///
    /// With nothing loaded this does nothing and returns false.
    pub fn toggle_play(&mut self) -> bool {
        if self.current_index.is_some() {
            self.is_playing = !self.is_playing;
        }
        self.is_playing
    }

    /// Reconcile with a play/pause echo from the audio element
    pub fn set_playing_state(&mut self, playing: bool) {
        self.is_playing = playing && self.current_index.is_some();
    }

    /// Returns the new value
    pub fn toggle_loop(&mut self) -> bool {
        self.is_looping = !self.is_looping;
        self.is_looping
    }

    /// Shuffle is a display toggle; the queue order never changes.
    /// Returns the new value.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.is_shuffling = !self.is_shuffling;
        self.is_shuffling
    }

    /// Advance to the next episode; returns false (and changes nothing)
    /// when there is none
    pub fn play_next(&mut self) -> bool {
        match self.current_index {
            Some(i) if i + 1 < self.queue.len() => {
                self.load(i + 1);
                true
            }
            _ => false,
        }
    }

    /// Go back to the previous episode; returns false (and changes
    /// nothing) when there is none
    pub fn play_previous(&mut self) -> bool {
        match self.current_index {
            Some(i) if i > 0 => {
                self.load(i - 1);
                true
            }
            _ => false,
        }
    }

    /// Drop the queue and stop. Loop and shuffle flags survive.
    pub fn clear_player_state(&mut self) {
        self.queue.clear();
        self.current_index = None;
        self.is_playing = false;
        self.progress_seconds = 0.0;
        self.duration_seconds = 0.0;
    }

    /// Move the playhead; returns the applied (clamped) position, or None
    /// when nothing is loaded
    pub fn seek(&mut self, position_seconds: f64) -> Option<f64> {
        self.current_index?;
        self.progress_seconds = self.clamp_position(position_seconds);
        Some(self.progress_seconds)
    }

    /// Time-update signal from the audio element. Never navigates.
    pub fn on_progress_tick(&mut self, position_seconds: f64) {
        if self.current_index.is_some() {
            self.progress_seconds = self.clamp_position(position_seconds);
        }
    }

    /// Loaded-metadata signal carrying the real duration
    ///
    /// Returns false when ignored (nothing loaded, or a duration that is
    /// not a positive finite number).
    pub fn on_metadata_loaded(&mut self, duration_seconds: f64) -> bool {
        if self.current_index.is_none() || !duration_seconds.is_finite() || duration_seconds <= 0.0
        {
            return false;
        }

        self.duration_seconds = duration_seconds;
        self.progress_seconds = self.clamp_position(self.progress_seconds);
        true
    }

    /// Ended signal: advance if possible, otherwise clear
    ///
    /// Looping never reaches here; an element with its native loop flag set
    /// restarts the source without signalling the end.
    pub fn on_episode_ended(&mut self) -> EndedOutcome {
        if self.play_next() {
            EndedOutcome::Advanced
        } else {
            self.clear_player_state();
            EndedOutcome::Cleared
        }
    }

    /// Immutable view for observers
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            queue: self.queue.clone(),
            current_index: self.current_index,
            current_episode: self.current_episode().cloned(),
            is_playing: self.is_playing,
            is_looping: self.is_looping,
            is_shuffling: self.is_shuffling,
            progress_seconds: self.progress_seconds,
            duration_seconds: self.duration_seconds,
            has_next: self.has_next(),
            has_previous: self.has_previous(),
            status: self.status(),
        }
    }

    fn load(&mut self, index: usize) {
        self.current_index = Some(index);
        self.progress_seconds = 0.0;
        self.duration_seconds = self.queue[index].duration.max(0.0);
    }

    fn clamp_position(&self, position_seconds: f64) -> f64 {
        if !position_seconds.is_finite() || position_seconds <= 0.0 {
            return 0.0;
        }
        if self.duration_seconds > 0.0 {
            position_seconds.min(self.duration_seconds)
        } else {
            position_seconds
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(id: &str, duration: f64) -> Episode {
        Episode {
            id: id.to_string(),
            title: format!("Episode {}", id),
            members: "Diego, Mayk".to_string(),
            thumbnail: format!("https://example.com/{}.jpg", id),
            url: format!("https://example.com/{}.m4a", id),
            duration,
        }
    }

    fn three() -> Vec<Episode> {
        vec![episode("a", 100.0), episode("b", 200.0), episode("c", 300.0)]
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = PlaybackSession::new();
        assert_eq!(session.status(), PlayerStatus::Empty);
        assert!(session.queue().is_empty());
        assert_eq!(session.current_index(), None);
        assert!(!session.is_playing());
        assert!(!session.has_next());
        assert!(!session.has_previous());
    }

    #[test]
    fn test_play_single_from_any_state() {
        let mut session = PlaybackSession::new();
        session.play_from_list(three(), 2);
        session.on_progress_tick(120.0);
        session.set_playing_state(false);

        session.play_single(episode("x", 50.0));

        assert_eq!(session.queue(), &[episode("x", 50.0)]);
        assert_eq!(session.current_index(), Some(0));
        assert!(session.is_playing());
        assert_eq!(session.progress_seconds(), 0.0);
        assert_eq!(session.duration_seconds(), 50.0);
        assert!(!session.has_next());
        assert!(!session.has_previous());
    }

    #[test]
    fn test_play_from_list_valid_index() {
        let mut session = PlaybackSession::new();
        session.play_from_list(three(), 1);

        assert_eq!(session.queue(), three().as_slice());
        assert_eq!(session.current_index(), Some(1));
        assert!(session.is_playing());
        assert_eq!(session.current_episode().unwrap().id, "b");
        assert!(session.has_next());
        assert!(session.has_previous());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_play_from_list_out_of_range_panics() {
        let mut session = PlaybackSession::new();
        session.play_from_list(three(), 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_play_from_empty_list_panics() {
        let mut session = PlaybackSession::new();
        session.play_from_list(Vec::new(), 0);
    }

    #[test]
    fn test_navigation_availability_matches_index() {
        let mut session = PlaybackSession::new();
        for index in 0..3 {
            session.play_from_list(three(), index);
            assert_eq!(session.has_next(), index < 2, "has_next at {}", index);
            assert_eq!(session.has_previous(), index > 0, "has_previous at {}", index);
        }
    }

    #[test]
    fn test_toggle_play_twice_restores() {
        let mut session = PlaybackSession::new();
        session.play_single(episode("a", 100.0));

        assert!(!session.toggle_play());
        assert_eq!(session.status(), PlayerStatus::Paused);
        assert!(session.toggle_play());
        assert_eq!(session.status(), PlayerStatus::Playing);
    }

    #[test]
    fn test_toggle_play_on_empty_queue_stays_stopped() {
        let mut session = PlaybackSession::new();
        assert!(!session.toggle_play());
        assert!(!session.toggle_play());
        assert_eq!(session, PlaybackSession::new());
    }

    #[test]
    fn test_set_playing_state() {
        let mut session = PlaybackSession::new();
        session.set_playing_state(true);
        assert!(!session.is_playing());

        session.play_single(episode("a", 100.0));
        session.set_playing_state(false);
        assert!(!session.is_playing());
        session.set_playing_state(true);
        assert!(session.is_playing());
    }

    #[test]
    fn test_loop_and_shuffle_are_flags_only() {
        let mut session = PlaybackSession::new();
        session.play_from_list(three(), 0);

        assert!(session.toggle_loop());
        assert!(session.toggle_shuffle());
        assert_eq!(session.queue(), three().as_slice());
        assert_eq!(session.current_index(), Some(0));

        assert!(!session.toggle_loop());
        assert!(!session.toggle_shuffle());
    }

    #[test]
    fn test_play_next_resets_progress() {
        let mut session = PlaybackSession::new();
        session.play_from_list(three(), 0);
        session.on_progress_tick(42.0);

        assert!(session.play_next());
        assert_eq!(session.current_index(), Some(1));
        assert_eq!(session.progress_seconds(), 0.0);
        assert_eq!(session.duration_seconds(), 200.0);
    }

    #[test]
    fn test_play_next_at_end_is_noop() {
        let mut session = PlaybackSession::new();
        session.play_from_list(three(), 2);
        session.on_progress_tick(10.0);
        let before = session.clone();

        assert!(!session.play_next());
        assert_eq!(session, before);
    }

    #[test]
    fn test_play_previous_at_start_is_noop() {
        let mut session = PlaybackSession::new();
        session.play_from_list(three(), 0);
        let before = session.clone();

        assert!(!session.play_previous());
        assert_eq!(session, before);
    }

    #[test]
    fn test_navigation_on_empty_is_noop() {
        let mut session = PlaybackSession::new();
        assert!(!session.play_next());
        assert!(!session.play_previous());
        assert_eq!(session, PlaybackSession::new());
    }

    #[test]
    fn test_play_previous_keeps_playing_flag() {
        let mut session = PlaybackSession::new();
        session.play_from_list(three(), 2);
        session.toggle_play();

        assert!(session.play_previous());
        assert_eq!(session.current_index(), Some(1));
        assert!(!session.is_playing());
    }

    #[test]
    fn test_clear_preserves_flags() {
        let mut session = PlaybackSession::new();
        session.play_from_list(three(), 1);
        session.toggle_loop();
        session.toggle_shuffle();

        session.clear_player_state();

        assert!(session.queue().is_empty());
        assert_eq!(session.current_index(), None);
        assert!(!session.is_playing());
        assert_eq!(session.progress_seconds(), 0.0);
        assert!(session.is_looping());
        assert!(session.is_shuffling());
        assert_eq!(session.status(), PlayerStatus::Empty);
    }

    #[test]
    fn test_progress_is_clamped_to_duration() {
        let mut session = PlaybackSession::new();
        session.play_single(episode("a", 100.0));

        session.on_progress_tick(150.0);
        assert_eq!(session.progress_seconds(), 100.0);

        session.on_progress_tick(-3.0);
        assert_eq!(session.progress_seconds(), 0.0);

        session.on_progress_tick(f64::NAN);
        assert_eq!(session.progress_seconds(), 0.0);

        session.on_progress_tick(33.5);
        assert_eq!(session.progress_seconds(), 33.5);
    }

    #[test]
    fn test_progress_unbounded_when_duration_unknown() {
        let mut session = PlaybackSession::new();
        session.play_single(episode("a", 0.0));

        session.on_progress_tick(500.0);
        assert_eq!(session.progress_seconds(), 500.0);
    }

    #[test]
    fn test_progress_ignored_when_empty() {
        let mut session = PlaybackSession::new();
        session.on_progress_tick(10.0);
        assert_eq!(session.progress_seconds(), 0.0);
    }

    #[test]
    fn test_seek() {
        let mut session = PlaybackSession::new();
        assert_eq!(session.seek(10.0), None);

        session.play_single(episode("a", 100.0));
        assert_eq!(session.seek(60.0), Some(60.0));
        assert_eq!(session.progress_seconds(), 60.0);
        assert_eq!(session.seek(1000.0), Some(100.0));
    }

    #[test]
    fn test_metadata_replaces_duration() {
        let mut session = PlaybackSession::new();
        assert!(!session.on_metadata_loaded(120.0));

        session.play_single(episode("a", 100.0));
        session.on_progress_tick(90.0);

        assert!(session.on_metadata_loaded(80.0));
        assert_eq!(session.duration_seconds(), 80.0);
        assert_eq!(session.progress_seconds(), 80.0);

        assert!(!session.on_metadata_loaded(f64::NAN));
        assert!(!session.on_metadata_loaded(0.0));
        assert_eq!(session.duration_seconds(), 80.0);
    }

    #[test]
    fn test_ended_matches_play_next_when_has_next() {
        let mut ended = PlaybackSession::new();
        ended.play_from_list(three(), 0);
        ended.on_progress_tick(99.0);
        let mut next = ended.clone();

        assert_eq!(ended.on_episode_ended(), EndedOutcome::Advanced);
        next.play_next();
        assert_eq!(ended, next);
    }

    #[test]
    fn test_ended_matches_clear_when_no_next() {
        let mut ended = PlaybackSession::new();
        ended.play_from_list(three(), 2);
        let mut cleared = ended.clone();

        assert_eq!(ended.on_episode_ended(), EndedOutcome::Cleared);
        cleared.clear_player_state();
        assert_eq!(ended, cleared);
    }

    #[test]
    fn test_two_episode_scenario() {
        let mut session = PlaybackSession::new();
        session.play_from_list(vec![episode("a", 100.0), episode("b", 200.0)], 0);
        assert_eq!(session.current_index(), Some(0));
        assert!(session.is_playing());
        assert_eq!(session.progress_seconds(), 0.0);

        session.on_progress_tick(100.0);
        session.on_episode_ended();
        assert_eq!(session.current_index(), Some(1));
        assert!(session.is_playing());
        assert_eq!(session.progress_seconds(), 0.0);

        session.on_episode_ended();
        assert!(session.queue().is_empty());
        assert_eq!(session.current_index(), None);
        assert!(!session.is_playing());
    }

    #[test]
    fn test_loop_does_not_change_ended_policy() {
        let mut session = PlaybackSession::new();
        session.play_single(episode("a", 100.0));
        session.toggle_loop();

        assert_eq!(session.on_episode_ended(), EndedOutcome::Cleared);
        assert_eq!(session.status(), PlayerStatus::Empty);
        assert!(session.is_looping());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = PlaybackSession::new();
        session.play_from_list(three(), 1);
        session.on_progress_tick(12.0);
        session.toggle_shuffle();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.queue.len(), 3);
        assert_eq!(snapshot.current_index, Some(1));
        assert_eq!(snapshot.current_episode.as_ref().map(|e| e.id.as_str()), Some("b"));
        assert!(snapshot.is_playing);
        assert!(snapshot.is_shuffling);
        assert!(!snapshot.is_looping);
        assert_eq!(snapshot.progress_seconds, 12.0);
        assert_eq!(snapshot.duration_seconds, 200.0);
        assert!(snapshot.has_next);
        assert!(snapshot.has_previous);
        assert_eq!(snapshot.status, PlayerStatus::Playing);
    }
}

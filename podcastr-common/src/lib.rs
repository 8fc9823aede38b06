//! # Podcastr Common Library
//!
//! Shared code for the Podcastr services including:
//! - Episode model and catalog record shape
//! - Event types (PlayerEvent enum) and the EventBus
//! - Configuration file resolution
//! - Human-readable duration and date formatting
//! - SSE stream helpers

pub mod config;
pub mod episode;
pub mod error;
pub mod events;
pub mod human_time;
pub mod sse;

pub use episode::{Episode, EpisodeRecord, EpisodeSummary};
pub use error::{Error, Result};
pub use events::{EventBus, PlayerEvent, PlayerStatus, SessionSnapshot};

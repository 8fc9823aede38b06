//! Playback session state machine and the shared player controller

pub mod controller;
pub mod session;

pub use controller::PlayerController;
pub use session::{EndedOutcome, PlaybackSession};

//! Error types for podcastr-player
//!
//! Defines module-specific error types using thiserror for clear error propagation.

use thiserror::Error;

/// Main error type for podcastr-player
#[derive(Error, Debug)]
pub enum Error {
    /// Episode catalog could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// No episode with this slug
    #[error("Episode not found: {0}")]
    EpisodeNotFound(String),

    /// Playlist index outside the playlist
    #[error("Index {index} out of range for playlist of {len} episodes")]
    InvalidIndex { index: usize, len: usize },

    /// Episode record rejected by the shared model
    #[error(transparent)]
    Common(#[from] podcastr_common::Error),
}

/// Convenience Result type using podcastr-player Error
pub type Result<T> = std::result::Result<T, Error>;

//! Common error types for Podcastr

use thiserror::Error;

/// Common result type for Podcastr operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Podcastr services
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Episode record could not be mapped to an episode
    #[error("Invalid episode record: {0}")]
    InvalidEpisode(String),
}

//! Episode model
//!
//! `Episode` is the read-only unit the player queues. `EpisodeRecord` is the
//! shape the content backend serves, and `EpisodeSummary` is the display
//! form used by listing and detail views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::human_time::{format_duration, format_published_date};
use crate::{Error, Result};

/// A playable podcast episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Slug, unique within a list
    pub id: String,
    pub title: String,
    /// Hosts and guests, as a display string
    pub members: String,
    /// Thumbnail image URL
    pub thumbnail: String,
    /// Audio source URL
    pub url: String,
    /// Duration in seconds
    pub duration: f64,
}

/// Episode as served by the content backend
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeRecord {
    pub slug: String,
    pub title: String,
    pub members: String,
    pub published_at: DateTime<Utc>,
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    pub file: EpisodeFile,
}

/// Audio file attached to an episode record
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeFile {
    pub url: String,
    pub duration: DurationValue,
}

/// The backend reports durations either as numbers or numeric strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(f64),
    Text(String),
}

impl DurationValue {
    /// Parse into seconds; rejects negative and non-finite values
    pub fn seconds(&self) -> Result<f64> {
        let value = match self {
            DurationValue::Seconds(s) => *s,
            DurationValue::Text(text) => text.trim().parse::<f64>().map_err(|e| {
                Error::InvalidEpisode(format!("duration {:?} is not a number: {}", text, e))
            })?,
        };

        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidEpisode(format!(
                "duration must be a non-negative number, got {}",
                value
            )));
        }
        Ok(value)
    }
}

/// Episode with display fields for listing and detail views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    #[serde(flatten)]
    pub episode: Episode,
    pub published_at: DateTime<Utc>,
    /// `d MMM yy`
    pub published_at_display: String,
    /// `HH:MM:SS`
    pub duration_as_string: String,
    /// HTML description
    pub description: String,
}

impl TryFrom<EpisodeRecord> for EpisodeSummary {
    type Error = Error;

    fn try_from(record: EpisodeRecord) -> Result<Self> {
        if record.slug.trim().is_empty() {
            return Err(Error::InvalidEpisode(format!(
                "episode {:?} has an empty slug",
                record.title
            )));
        }

        let duration = record.file.duration.seconds().map_err(|e| match e {
            Error::InvalidEpisode(msg) => {
                Error::InvalidEpisode(format!("episode {}: {}", record.slug, msg))
            }
            other => other,
        })?;

        Ok(EpisodeSummary {
            published_at_display: format_published_date(&record.published_at),
            duration_as_string: format_duration(duration),
            published_at: record.published_at,
            description: record.description,
            episode: Episode {
                id: record.slug,
                title: record.title,
                members: record.members,
                thumbnail: record.thumbnail,
                url: record.file.url,
                duration,
            },
        })
    }
}

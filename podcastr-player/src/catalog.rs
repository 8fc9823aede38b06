//! Episode catalog
//!
//! Read-only episode list loaded once at startup from a JSON file in the
//! content backend's record shape. Provides the home listing (latest
//! releases plus everything else), the combined playlist the home page
//! hands to the player, and slug lookup for the detail page.

use podcastr_common::{Episode, EpisodeRecord, EpisodeSummary};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};

/// Home page listing entry
#[derive(Debug, Clone, Serialize)]
pub struct ListingEntry {
    #[serde(flatten)]
    pub summary: EpisodeSummary,
    /// Position of this episode in `Catalog::playlist()`
    pub playlist_index: usize,
}

/// Home page listing
#[derive(Debug, Clone, Serialize)]
pub struct HomeListing {
    pub latest: Vec<ListingEntry>,
    pub all: Vec<ListingEntry>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    episodes: Vec<EpisodeSummary>,
    latest_count: usize,
    /// Episodes shown on the home page; the rest are reachable by slug only
    listing_limit: usize,
}

impl Catalog {
    /// Build a catalog from backend records
    ///
    /// Records are ordered by publication date (oldest first, ties keep file
    /// order). Slugs must be unique.
    pub fn from_records(records: Vec<EpisodeRecord>, latest_count: usize) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut episodes = Vec::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.slug.clone()) {
                return Err(Error::Catalog(format!("duplicate slug {:?}", record.slug)));
            }
            episodes.push(EpisodeSummary::try_from(record)?);
        }

        episodes.sort_by_key(|summary| summary.published_at);

        Ok(Self {
            episodes,
            latest_count,
            listing_limit: usize::MAX,
        })
    }

    /// Cap the home listing and playlist at `limit` episodes
    pub fn with_listing_limit(mut self, limit: usize) -> Self {
        self.listing_limit = limit;
        self
    }

    /// Load a catalog from a JSON array of episode records
    pub fn load(path: &Path, latest_count: usize) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let records: Vec<EpisodeRecord> = serde_json::from_str(&content).map_err(|e| {
            Error::Catalog(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let catalog = Self::from_records(records, latest_count)?;
        info!(
            "Loaded {} episodes from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    fn listed(&self) -> &[EpisodeSummary] {
        &self.episodes[..self.listing_limit.min(self.episodes.len())]
    }

    /// Latest releases and the remaining listed episodes
    pub fn home(&self) -> HomeListing {
        let listed = self.listed();
        let split = self.latest_count.min(listed.len());
        let entries: Vec<ListingEntry> = listed
            .iter()
            .cloned()
            .enumerate()
            .map(|(playlist_index, summary)| ListingEntry {
                summary,
                playlist_index,
            })
            .collect();

        let mut latest = entries;
        let all = latest.split_off(split);
        HomeListing { latest, all }
    }

    /// Every episode in listing order, latest releases first
    ///
    /// An entry at position `i` of `HomeListing::all` plays index
    /// `i + latest.len()`.
    pub fn playlist(&self) -> Vec<Episode> {
        self.listed().iter().map(|s| s.episode.clone()).collect()
    }

    /// Look up an episode by slug, listed or not
    pub fn find(&self, slug: &str) -> Option<&EpisodeSummary> {
        self.episodes.iter().find(|s| s.episode.id == slug)
    }
}

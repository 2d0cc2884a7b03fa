use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::Deserialize;
use thiserror::Error;

use super::{Page, PageRequest, Sort, StoreError, Track, TrackStore, TrackSummary};

/// Errors that can occur when loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Duplicate track id {id} in seed file")]
    DuplicateId { id: u64 },
}

/// On-disk seed format: a list of `[[tracks]]` tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackSeed {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Track store held in memory.
///
/// Reads take a shared lock, so concurrent queries never wait on each other.
#[derive(Debug, Default)]
pub struct InMemoryTrackStore {
    tracks: RwLock<Vec<Track>>,
}

impl InMemoryTrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tracks(tracks: impl IntoIterator<Item = Track>) -> Self {
        let store = Self::new();
        for track in tracks {
            store.insert(track);
        }
        store
    }

    /// Load tracks from a TOML seed file.
    pub fn from_seed_file(path: &Path) -> Result<Self, SeedError> {
        let content = fs::read_to_string(path).map_err(|e| SeedError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let seed: TrackSeed = toml::from_str(&content).map_err(|e| SeedError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut seen = HashSet::new();
        for track in &seed.tracks {
            if !seen.insert(track.id) {
                return Err(SeedError::DuplicateId { id: track.id });
            }
        }

        tracing::info!(count = seed.tracks.len(), path = %path.display(), "Loaded track seed");
        Ok(Self::from_tracks(seed.tracks))
    }

    /// Insert or replace a track by id.
    pub fn insert(&self, track: Track) {
        let mut tracks = self.tracks.write();
        match tracks.binary_search_by_key(&track.id, |t| t.id) {
            Ok(pos) => tracks[pos] = track,
            Err(pos) => tracks.insert(pos, track),
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.read().is_empty()
    }

    fn query<F>(&self, request: PageRequest, matches: F) -> Page<TrackSummary>
    where
        F: Fn(&Track) -> bool,
    {
        let tracks = self.tracks.read();
        // Kept sorted by id on insert.
        let rows: Vec<TrackSummary> = match request.sort {
            Sort::IdAscending => tracks
                .iter()
                .filter(|track| matches(track))
                .map(TrackSummary::from)
                .collect(),
        };
        Page::slice(rows, request)
    }
}

impl TrackStore for InMemoryTrackStore {
    fn find_all(&self, request: PageRequest) -> Result<Page<TrackSummary>, StoreError> {
        Ok(self.query(request, |_| true))
    }

    fn find_by_name_like(
        &self,
        fragment: &str,
        request: PageRequest,
    ) -> Result<Page<TrackSummary>, StoreError> {
        let needle = fragment.to_lowercase();
        Ok(self.query(request, |track| track.name.to_lowercase().contains(&needle)))
    }

    fn find_by_uploader(
        &self,
        uploader_id: u64,
        request: PageRequest,
    ) -> Result<Page<TrackSummary>, StoreError> {
        Ok(self.query(request, |track| track.uploader_id == uploader_id))
    }
}

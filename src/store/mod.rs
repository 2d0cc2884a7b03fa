//! Track store collaborator.
//!
//! The pagination core only sees the [`TrackStore`] trait: three paginated
//! read queries whose page size and ordering are dictated by the caller.

mod memory;

pub use memory::{InMemoryTrackStore, SeedError, TrackSeed};

use serde::Deserialize;
use thiserror::Error;

/// A stored track.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub id: u64,
    pub name: String,
    pub uploader_id: u64,
}

/// Read-only projection of a track used for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSummary {
    pub id: u64,
    pub name: String,
}

impl From<&Track> for TrackSummary {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id,
            name: track.name.clone(),
        }
    }
}

/// Result ordering requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sort {
    #[default]
    IdAscending,
}

/// Which slice of the result set to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based.
    pub page_index: u32,
    pub page_size: u32,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size,
            sort: Sort::IdAscending,
        }
    }

    /// Offset of the first row, in rows.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_index) * u64::from(self.page_size)
    }
}

/// One page as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based.
    pub number: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Slice `rows` (already filtered and sorted) according to `request`.
    pub fn slice(rows: Vec<T>, request: PageRequest) -> Self {
        let total = rows.len() as u64;
        let size = u64::from(request.page_size.max(1));
        let total_pages = u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX);
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);

        let content = rows
            .into_iter()
            .skip(offset)
            .take(request.page_size as usize)
            .collect();

        Self {
            content,
            number: request.page_index,
            total_pages,
            has_next: request.page_index.saturating_add(1) < total_pages,
            has_previous: request.page_index > 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Errors surfaced by a store query.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("track store unavailable: {0}")]
    Unavailable(String),

    #[error("track store query failed: {0}")]
    Query(String),
}

/// Paginated read access to tracks.
///
/// Implementations must honour the requested page size and ordering.
pub trait TrackStore: Send + Sync {
    /// All tracks.
    fn find_all(&self, request: PageRequest) -> Result<Page<TrackSummary>, StoreError>;

    /// Tracks whose name contains `fragment`.
    fn find_by_name_like(
        &self,
        fragment: &str,
        request: PageRequest,
    ) -> Result<Page<TrackSummary>, StoreError>;

    /// Tracks uploaded by `uploader_id`.
    fn find_by_uploader(
        &self,
        uploader_id: u64,
        request: PageRequest,
    ) -> Result<Page<TrackSummary>, StoreError>;
}

impl<S: TrackStore + ?Sized> TrackStore for std::sync::Arc<S> {
    fn find_all(&self, request: PageRequest) -> Result<Page<TrackSummary>, StoreError> {
        (**self).find_all(request)
    }

    fn find_by_name_like(
        &self,
        fragment: &str,
        request: PageRequest,
    ) -> Result<Page<TrackSummary>, StoreError> {
        (**self).find_by_name_like(fragment, request)
    }

    fn find_by_uploader(
        &self,
        uploader_id: u64,
        request: PageRequest,
    ) -> Result<Page<TrackSummary>, StoreError> {
        (**self).find_by_uploader(uploader_id, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_first_page() {
        let page = Page::slice((1..=20).collect::<Vec<u32>>(), PageRequest::new(0, 15));
        assert_eq!(page.content, (1..=15).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn slice_last_partial_page() {
        let page = Page::slice((1..=20).collect::<Vec<u32>>(), PageRequest::new(1, 15));
        assert_eq!(page.content, (16..=20).collect::<Vec<_>>());
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn slice_past_the_end_is_empty() {
        let page = Page::slice((1..=20).collect::<Vec<u32>>(), PageRequest::new(9, 15));
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.number, 9);
    }

    #[test]
    fn slice_of_nothing_has_no_pages() {
        let page = Page::slice(Vec::<u32>::new(), PageRequest::new(0, 15));
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
    }

    #[test]
    fn huge_page_index_does_not_overflow() {
        let page = Page::slice(vec![1u32, 2, 3], PageRequest::new(u32::MAX, 15));
        assert!(page.is_empty());
    }
}

//! Maps a validated page state to exactly one store query.

use thiserror::Error;

use super::state::{PageResult, PageState, TrackQuery, PAGE_SIZE, USER_ID_FILTER};
use crate::store::{PageRequest, StoreError, TrackStore};

/// Errors that can occur while running a page query.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A filter is present but its value cannot be used.
    #[error("Invalid value '{value}' for filter '{field}'")]
    InvalidFilter { field: &'static str, value: String },

    /// The store returned no rows for the requested page.
    #[error("Empty page")]
    EmptyPage,

    /// The store call itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read-only query runner over a [`TrackStore`].
#[derive(Debug, Clone)]
pub struct Dispatcher<S> {
    store: S,
}

impl<S: TrackStore> Dispatcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the query described by `state`. Always requests [`PAGE_SIZE`]
    /// rows ordered by id ascending.
    pub fn dispatch(&self, state: &PageState) -> Result<PageResult, DispatchError> {
        let request = PageRequest::new(state.page_index, PAGE_SIZE);

        let page = match &state.query {
            TrackQuery::All => self.store.find_all(request)?,
            TrackQuery::ByName { track_name } => {
                self.store.find_by_name_like(track_name, request)?
            }
            TrackQuery::ByUser { user_id } => {
                let uploader_id = parse_user_id(user_id)?;
                self.store.find_by_uploader(uploader_id, request)?
            }
        };

        if page.is_empty() {
            return Err(DispatchError::EmptyPage);
        }

        // Position and flags come from the request, not from the store's report.
        Ok(PageResult::new(
            page.content,
            state.page_index,
            page.total_pages,
        ))
    }
}

fn parse_user_id(raw: &str) -> Result<u64, DispatchError> {
    raw.parse().map_err(|_| DispatchError::InvalidFilter {
        field: USER_ID_FILTER,
        value: raw.to_string(),
    })
}

//! Page state carried by buttons, and the page result produced by a query.

use std::fmt;

use crate::store::TrackSummary;

/// Number of tracks shown on one page.
///
/// Dispatch and render share it; decoding never reads it, so identifiers
/// encoded under a different page size still decode.
pub const PAGE_SIZE: u32 = 15;

/// Command name reserved for the close control.
pub const CLOSE_COMMAND: &str = "close";

/// Query variant selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subcommand {
    All,
    ByName,
    ByUser,
}

impl Subcommand {
    pub const ALL: [Subcommand; 3] = [Subcommand::All, Subcommand::ByName, Subcommand::ByUser];

    /// Name used both as the slash subcommand and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Subcommand::All => "all",
            Subcommand::ByName => "name",
            Subcommand::ByUser => "user",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sub| sub.as_str() == name)
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter key holding the name fragment of a `name` query.
pub const TRACK_NAME_FILTER: &str = "track_name";
/// Filter key holding the uploader id of a `user` query.
pub const USER_ID_FILTER: &str = "user_id";

/// A subcommand together with the filters it requires.
///
/// Each variant owns exactly the filters its query needs, so a `name`
/// query without a track name cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackQuery {
    All,
    ByName { track_name: String },
    /// `user_id` is kept verbatim; it is parsed when the query runs.
    ByUser { user_id: String },
}

impl TrackQuery {
    pub fn subcommand(&self) -> Subcommand {
        match self {
            TrackQuery::All => Subcommand::All,
            TrackQuery::ByName { .. } => Subcommand::ByName,
            TrackQuery::ByUser { .. } => Subcommand::ByUser,
        }
    }

    /// The `(key, value)` filter pair of this query, if it has one.
    pub fn filter(&self) -> Option<(&'static str, &str)> {
        match self {
            TrackQuery::All => None,
            TrackQuery::ByName { track_name } => Some((TRACK_NAME_FILTER, track_name)),
            TrackQuery::ByUser { user_id } => Some((USER_ID_FILTER, user_id)),
        }
    }
}

/// Everything needed to rebuild a query and its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageState {
    /// Name of the command that owns this state.
    pub command: String,
    pub query: TrackQuery,
    /// Zero-based page index.
    pub page_index: u32,
}

impl PageState {
    pub fn new(command: impl Into<String>, query: TrackQuery, page_index: u32) -> Self {
        Self {
            command: command.into(),
            query,
            page_index,
        }
    }

    pub fn subcommand(&self) -> Subcommand {
        self.query.subcommand()
    }

    /// Same query and owner, different page.
    pub fn at_page(&self, page_index: u32) -> Self {
        Self {
            command: self.command.clone(),
            query: self.query.clone(),
            page_index,
        }
    }

    /// State for the previous page. Saturates at the first page.
    pub fn previous(&self) -> Self {
        self.at_page(self.page_index.saturating_sub(1))
    }

    /// State for the next page. Saturates at `u32::MAX`.
    pub fn next(&self) -> Self {
        self.at_page(self.page_index.saturating_add(1))
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub items: Vec<TrackSummary>,
    pub page_index: u32,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageResult {
    /// Build a result, deriving the boundary flags from the position.
    pub fn new(items: Vec<TrackSummary>, page_index: u32, total_pages: u32) -> Self {
        Self {
            items,
            page_index,
            total_pages,
            has_previous: page_index > 0,
            has_next: u64::from(page_index) + 1 < u64::from(total_pages),
        }
    }

    /// Footer position as shown to users: one-based.
    pub fn display_page(&self) -> u64 {
        u64::from(self.page_index) + 1
    }
}

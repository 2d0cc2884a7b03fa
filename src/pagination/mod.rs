//! Stateless interactive pagination.
//!
//! All query context travels inside button identifiers:
//!
//! ```text
//! PageState ──encode──→ identifier ──(click)──→ decode ──→ PageState
//!     │                                                        │
//!     └──dispatch──→ PageResult ──render──→ text + buttons ←───┘
//! ```

pub mod codec;
pub mod dispatch;
pub mod render;
pub mod state;

pub use codec::{ButtonCodec, DecodeError, EncodeError, RawButton, DEFAULT_MAX_IDENTIFIER_LEN};
pub use dispatch::{DispatchError, Dispatcher};
pub use render::{Button, Control, PageRenderer, RenderedPage, DEFAULT_EMBED_COLOR};
pub use state::{
    PageResult, PageState, Subcommand, TrackQuery, CLOSE_COMMAND, PAGE_SIZE, TRACK_NAME_FILTER,
    USER_ID_FILTER,
};

//! Interaction state machine.
//!
//! Every inbound event runs through its own machine instance:
//!
//! - `state.rs` - Interaction states
//! - `intent.rs` - Events and effect outcomes
//! - `reducer.rs` - Pure state transitions
//! - `machine.rs` - Effect driver
//! - `rejection.rs` - User-facing failure messages

mod intent;
mod machine;
mod reducer;
mod rejection;
mod state;

pub use intent::InteractionIntent;
pub use machine::{Interaction, NAME_OPTION, PAGE_OPTION, USER_OPTION};
pub use reducer::{InteractionReducer, PUBLISH_NOTICE};
pub use rejection::Rejection;
pub use state::{InteractionState, Origin};

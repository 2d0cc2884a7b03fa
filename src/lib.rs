//! Stateless paginated track browsing for chat bots.
//!
//! Button identifiers carry the whole query context, so paging needs no
//! server-side session. See [`pagination`] for the protocol and
//! [`interaction`] for how a single event is handled.

pub mod bot;
pub mod command;
pub mod config;
pub mod console;
pub mod host;
pub mod interaction;
pub mod logging;
pub mod mvi;
pub mod pagination;
pub mod store;

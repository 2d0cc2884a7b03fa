//! User-facing rejection reasons.

use crate::pagination::{DecodeError, DispatchError};

/// Why an interaction ended without a page.
///
/// The message of each variant is the only text a user ever sees for a
/// failure; details stay in the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Invocation options failed validation.
    InvalidInput(String),
    /// A button identifier could not be decoded or used.
    InvalidButton,
    /// Subcommand outside the known set. Caller-supplied, safe to echo.
    UnknownSubcommand(String),
    EmptyPage,
    /// The track store could not answer.
    Unavailable,
    /// The page could not be turned into buttons.
    RenderFailed,
}

impl Rejection {
    pub fn message(&self) -> String {
        match self {
            Rejection::InvalidInput(reason) => reason.clone(),
            Rejection::InvalidButton => "Invalid button".to_string(),
            Rejection::UnknownSubcommand(name) => format!("Unknown option `{}`", name),
            Rejection::EmptyPage => "Empty page".to_string(),
            Rejection::Unavailable => "The track index is unavailable right now".to_string(),
            Rejection::RenderFailed => "This page cannot be displayed".to_string(),
        }
    }
}

impl From<&DecodeError> for Rejection {
    fn from(err: &DecodeError) -> Self {
        match err {
            DecodeError::UnknownSubcommand(name) => Rejection::UnknownSubcommand(name.clone()),
            _ => Rejection::InvalidButton,
        }
    }
}

impl From<&DispatchError> for Rejection {
    fn from(err: &DispatchError) -> Self {
        match err {
            DispatchError::InvalidFilter { .. } => Rejection::InvalidButton,
            DispatchError::EmptyPage => Rejection::EmptyPage,
            DispatchError::Store(_) => Rejection::Unavailable,
        }
    }
}

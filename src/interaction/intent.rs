//! Intents fed to the interaction reducer.

use crate::mvi::Intent;
use crate::pagination::{
    DecodeError, DispatchError, EncodeError, PageResult, PageState, RawButton, RenderedPage,
};

use super::rejection::Rejection;

#[derive(Debug)]
pub enum InteractionIntent {
    /// A slash invocation produced a valid state.
    Invoked { state: PageState },

    /// A slash invocation failed validation.
    Refused(Rejection),

    /// A button was clicked.
    Clicked { identifier: String },

    /// The identifier passed the syntax stage.
    Parsed(RawButton),

    /// The identifier is the close control.
    CloseRequested,

    /// The identifier names another handler.
    ForeignCommand,

    /// The identifier decoded to a full page state.
    Validated(PageState),

    DecodeFailed(DecodeError),

    Dispatched(PageResult),

    DispatchFailed(DispatchError),

    Rendered(RenderedPage),

    RenderFailed(EncodeError),
}

impl Intent for InteractionIntent {}

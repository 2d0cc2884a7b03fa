//! Drives one interaction from its first intent to a terminal state.
//!
//! The reducer decides transitions; this driver performs the effect each
//! intermediate state asks for (parse, validate, dispatch, render) and feeds
//! the outcome back as the next intent.

use crate::host::SlashInvocation;
use crate::mvi::{MachineState, Reducer};
use crate::pagination::{
    ButtonCodec, Dispatcher, DispatchError, PageRenderer, PageState, Subcommand, TrackQuery,
};
use crate::store::TrackStore;

use super::intent::InteractionIntent;
use super::reducer::InteractionReducer;
use super::rejection::Rejection;
use super::state::InteractionState;

/// Option holding the one-based page number.
pub const PAGE_OPTION: &str = "page";
/// Option holding the name fragment of the `name` subcommand.
pub const NAME_OPTION: &str = "name";
/// Option holding the uploader of the `user` subcommand.
pub const USER_OPTION: &str = "user";

const OPTIONS_TOO_LONG: &str = "Options are too long!";

/// Pagination pipeline bound to one command name.
#[derive(Debug, Clone)]
pub struct Interaction<S> {
    command: String,
    codec: ButtonCodec,
    dispatcher: Dispatcher<S>,
    renderer: PageRenderer,
}

impl<S: TrackStore> Interaction<S> {
    pub fn new(command: impl Into<String>, store: S, renderer: PageRenderer) -> Self {
        Self {
            command: command.into(),
            codec: *renderer.codec(),
            dispatcher: Dispatcher::new(store),
            renderer,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Handle a slash invocation.
    pub fn invoke(&self, invocation: &SlashInvocation) -> InteractionState {
        let intent = match self.initial_state(invocation) {
            Ok(state) => InteractionIntent::Invoked { state },
            Err(rejection) => {
                tracing::debug!(?rejection, "Invocation refused");
                InteractionIntent::Refused(rejection)
            }
        };
        self.run(intent)
    }

    /// Handle a button click.
    pub fn click(&self, identifier: &str) -> InteractionState {
        self.run(InteractionIntent::Clicked {
            identifier: identifier.to_string(),
        })
    }

    fn run(&self, first: InteractionIntent) -> InteractionState {
        let mut state = InteractionReducer::reduce(InteractionState::Idle, first);
        while let Some(intent) = self.step(&state) {
            state = InteractionReducer::reduce(state, intent);
        }
        debug_assert!(state.is_terminal());
        state
    }

    /// The effect owed by `state`, as the intent it produces.
    fn step(&self, state: &InteractionState) -> Option<InteractionIntent> {
        let intent = match state {
            InteractionState::Decoding { identifier } => match self.codec.parse(identifier) {
                Ok(button) => InteractionIntent::Parsed(button),
                Err(err) => {
                    tracing::debug!(error = %err, identifier = %identifier, "Invalid button");
                    InteractionIntent::DecodeFailed(err)
                }
            },

            InteractionState::Validating { button } => {
                if button.is_close() {
                    InteractionIntent::CloseRequested
                } else if !button.is_owned_by(&self.command) {
                    tracing::trace!(command = button.command(), "Button owned by another handler");
                    InteractionIntent::ForeignCommand
                } else {
                    match button.clone().into_page_state() {
                        Ok(state) => InteractionIntent::Validated(state),
                        Err(err) => {
                            tracing::debug!(error = %err, "Invalid button");
                            InteractionIntent::DecodeFailed(err)
                        }
                    }
                }
            }

            InteractionState::Dispatching { state, .. } => match self.dispatcher.dispatch(state) {
                Ok(result) => InteractionIntent::Dispatched(result),
                Err(err) => {
                    match &err {
                        DispatchError::Store(source) => {
                            tracing::warn!(error = %source, "Track query failed");
                        }
                        DispatchError::InvalidFilter { .. } => {
                            tracing::debug!(error = %err, "Invalid button");
                        }
                        DispatchError::EmptyPage => {
                            tracing::debug!(page_index = state.page_index, "Empty page");
                        }
                    }
                    InteractionIntent::DispatchFailed(err)
                }
            },

            InteractionState::Rendering { state, result, .. } => {
                match self.renderer.render(result, state) {
                    Ok(page) => InteractionIntent::Rendered(page),
                    Err(err) => {
                        tracing::warn!(error = %err, "Failed to render page controls");
                        InteractionIntent::RenderFailed(err)
                    }
                }
            }

            InteractionState::Idle
            | InteractionState::Responded(_)
            | InteractionState::Rejected(_)
            | InteractionState::Ignored => return None,
        };
        Some(intent)
    }

    /// Build the first page state from structured invocation options.
    fn initial_state(&self, invocation: &SlashInvocation) -> Result<PageState, Rejection> {
        let page = invocation.integer(PAGE_OPTION).unwrap_or(1);
        if page < 1 {
            return Err(Rejection::InvalidInput(
                "Page option must be positive!".to_string(),
            ));
        }
        let page_index = u32::try_from(page - 1)
            .map_err(|_| Rejection::InvalidInput("Page option is too large!".to_string()))?;

        let subcommand = invocation.subcommand.as_deref().unwrap_or_default();
        let query = match Subcommand::from_name(subcommand) {
            Some(Subcommand::All) => TrackQuery::All,
            Some(Subcommand::ByName) => TrackQuery::ByName {
                track_name: invocation
                    .string(NAME_OPTION)
                    .ok_or_else(|| missing_option(NAME_OPTION))?
                    .to_string(),
            },
            Some(Subcommand::ByUser) => TrackQuery::ByUser {
                user_id: invocation
                    .user(USER_OPTION)
                    .ok_or_else(|| missing_option(USER_OPTION))?
                    .to_string(),
            },
            None => return Err(Rejection::UnknownSubcommand(subcommand.to_string())),
        };

        let state = PageState::new(self.command.clone(), query, page_index);

        // Buttons for every reachable page must fit, not just this one.
        if let Err(err) = self.codec.encode(&state.at_page(u32::MAX)) {
            tracing::debug!(error = %err, "Options do not fit in a button");
            return Err(Rejection::InvalidInput(OPTIONS_TOO_LONG.to_string()));
        }

        Ok(state)
    }
}

fn missing_option(name: &str) -> Rejection {
    Rejection::InvalidInput(format!("Missing option `{}`", name))
}

//! Reducer for interaction state transitions.

use crate::host::Reply;
use crate::mvi::{MachineState, Reducer};

use super::intent::InteractionIntent;
use super::rejection::Rejection;
use super::state::{InteractionState, Origin};

/// Acknowledgement sent privately alongside a freshly posted page.
pub const PUBLISH_NOTICE: &str = "Here's your track index!";

pub struct InteractionReducer;

impl Reducer for InteractionReducer {
    type State = InteractionState;
    type Intent = InteractionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        use InteractionIntent as I;
        use InteractionState as S;

        match (state, intent) {
            (S::Idle, I::Invoked { state }) => S::Dispatching {
                state,
                origin: Origin::Invocation,
            },
            (S::Idle, I::Refused(rejection)) => S::Rejected(rejection),
            (S::Idle, I::Clicked { identifier }) => S::Decoding { identifier },

            (S::Decoding { .. }, I::Parsed(button)) => S::Validating { button },
            (S::Decoding { .. }, I::DecodeFailed(err)) => S::Rejected(Rejection::from(&err)),

            (S::Validating { .. }, I::CloseRequested) => S::Responded(Reply::DeleteOrigin),
            (S::Validating { .. }, I::ForeignCommand) => S::Ignored,
            (S::Validating { .. }, I::Validated(state)) => S::Dispatching {
                state,
                origin: Origin::Click,
            },
            (S::Validating { .. }, I::DecodeFailed(err)) => S::Rejected(Rejection::from(&err)),

            (S::Dispatching { state, origin }, I::Dispatched(result)) => S::Rendering {
                state,
                result,
                origin,
            },
            (S::Dispatching { .. }, I::DispatchFailed(err)) => S::Rejected(Rejection::from(&err)),

            (S::Rendering { origin, .. }, I::Rendered(page)) => S::Responded(match origin {
                Origin::Invocation => Reply::Publish {
                    notice: PUBLISH_NOTICE.to_string(),
                    page,
                },
                Origin::Click => Reply::Replace { page },
            }),
            (S::Rendering { .. }, I::RenderFailed(_)) => S::Rejected(Rejection::RenderFailed),

            (done, _) if done.is_terminal() => done,
            // An intent that does not fit ends the interaction rather than stalling it.
            (stalled, intent) => {
                tracing::error!(state = ?stalled, ?intent, "Intent does not apply to state");
                S::Rejected(Rejection::Unavailable)
            }
        }
    }
}

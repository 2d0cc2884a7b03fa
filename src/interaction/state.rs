//! States of a single interaction.

use crate::host::Reply;
use crate::mvi::MachineState;
use crate::pagination::{PageResult, PageState, RawButton};

use super::rejection::Rejection;

/// How the interaction started; decides the shape of the final reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Slash invocation: acknowledge privately, post a new message.
    Invocation,
    /// Button click: replace the clicked message.
    Click,
}

/// Where an interaction is.
///
/// ```text
/// Idle ─→ Decoding ─→ Validating ─→ Dispatching ─→ Rendering ─→ Responded
///   │         │           │  │  │         │            │
///   │         └───────────┴──┼──┼─────────┴────────────┴──→ Rejected
///   │                        │  └──→ Responded (close)
///   │                        └─────→ Ignored (other handler)
///   └──→ Dispatching (invocation)
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,

    Decoding {
        identifier: String,
    },

    Validating {
        button: RawButton,
    },

    Dispatching {
        state: PageState,
        origin: Origin,
    },

    Rendering {
        state: PageState,
        result: PageResult,
        origin: Origin,
    },

    Responded(Reply),

    Rejected(Rejection),

    /// The button belongs to another handler.
    Ignored,
}

impl MachineState for InteractionState {
    fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Responded(_) | Self::Rejected(_) | Self::Ignored
        )
    }
}

impl InteractionState {
    /// The reply owed to the user, if any.
    pub fn into_reply(self) -> Option<Reply> {
        match self {
            Self::Responded(reply) => Some(reply),
            Self::Rejected(rejection) => Some(Reply::Ephemeral(rejection.message())),
            _ => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

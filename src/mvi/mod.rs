//! State / Intent / Reducer primitives for pure state machines.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Effect
//!    ↑                               │
//!    └───────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot of where a machine is
//! - **Intent**: Outcome of an effect, or an external event
//! - **Reducer**: Pure function that moves the machine to its next state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::MachineState;

//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Inbound events (slash invocations, button clicks)
/// - Outcomes of effects (decoded, dispatched, rendered)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}

//! Base trait for machine state.

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (everything the next effect needs)
/// - Comparable (PartialEq for asserting transitions)
pub trait MachineState: Clone + PartialEq + Default + Send + 'static {
    /// Whether no further intent can move this state.
    fn is_terminal(&self) -> bool;
}

//! Interactive placement: selection, drag, handle resize and re-layering.

/// Pointer state machine.
pub mod controller;
/// Resize grips.
pub mod handles;
/// The trait editable containers implement.
pub mod surface;

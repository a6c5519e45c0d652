//! Frame generation: value binding, the render cache and the compositor.

pub(crate) mod cache;
/// The multi-layer compositor.
pub mod compositor;
/// Output frame type.
pub mod frame;
/// Runtime values and resolvers.
pub mod values;

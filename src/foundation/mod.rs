//! Shared primitives: geometry, identifiers, errors and pixel math.

/// Canvas, scale factor and rectangle types.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Element and collection identifiers.
pub mod ids;
pub(crate) mod math;

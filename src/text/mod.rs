//! Text styling and rasterization.

/// SVG-backed text rasterizer.
pub mod raster;
/// Immutable font style and anchors.
pub mod style;

//! CPU raster primitives over premultiplied RGBA8 bitmaps.

/// Bitmap type and geometric helpers.
pub mod bitmap;
/// Source-over compositing.
pub mod composite;
/// SVG rasterization through resvg.
pub mod svg;

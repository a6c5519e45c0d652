//! Asset access: image decoding, fonts, colors and the rooted asset store.

/// Hex colors and contrast helpers.
pub mod color;
/// Image/SVG decoding and PNG encoding.
pub mod decode;
/// Font database used for text rasterization.
pub mod fonts;
/// Rooted, path-normalized asset reads.
pub mod store;

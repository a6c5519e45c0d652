use std::io::Cursor;

use anyhow::Context;

use crate::assets::fonts::FontBook;
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::raster::bitmap::Bitmap;

/// Decode encoded image bytes into a premultiplied [`Bitmap`].
pub fn decode_image(bytes: &[u8]) -> LayoutResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| LayoutError::asset(format!("decode image from memory: {e}")))?;
    let mut rgba = dyn_img.to_rgba8();
    premultiply_rgba8_in_place(&mut rgba);
    Ok(rgba)
}

/// Encode a premultiplied [`Bitmap`] as a straight-alpha PNG.
pub fn encode_png(bitmap: &Bitmap) -> LayoutResult<Vec<u8>> {
    let mut straight = bitmap.clone();
    unpremultiply_rgba8_in_place(&mut straight);
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(straight)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Parse an SVG document, resolving `font-family` through `fonts`.
pub fn parse_svg(svg: &str, fonts: &FontBook) -> LayoutResult<usvg::Tree> {
    let opts = usvg::Options {
        fontdb: fonts.database(),
        font_resolver: fonts.resolver(),
        ..Default::default()
    };
    usvg::Tree::from_str(svg, &opts).map_err(|e| LayoutError::render(format!("parse svg: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

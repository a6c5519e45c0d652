use crate::foundation::error::{LayoutError, LayoutResult};
use crate::raster::bitmap::Bitmap;

const MAX_DIM: u32 = 16_384;

/// Natural pixel size of a parsed SVG.
pub fn svg_raster_size(tree: &usvg::Tree) -> LayoutResult<(u32, u32)> {
    fn to_px(v: f32) -> LayoutResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(LayoutError::render("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    Ok((to_px(size.width())?, to_px(size.height())?))
}

/// Rasterize `tree` stretched onto a `width x height` premultiplied bitmap.
pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> LayoutResult<Bitmap> {
    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    render_with(tree, width, height, resvg::tiny_skia::Transform::from_scale(sx, sy))
}

/// Rasterize `tree` at its natural scale, shifted by `(dx, dy)` pixels.
pub fn rasterize_svg_offset(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
    dx: f32,
    dy: f32,
) -> LayoutResult<Bitmap> {
    render_with(
        tree,
        width,
        height,
        resvg::tiny_skia::Transform::from_translate(dx, dy),
    )
}

fn render_with(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
    xform: resvg::tiny_skia::Transform,
) -> LayoutResult<Bitmap> {
    if width > MAX_DIM || height > MAX_DIM {
        return Err(LayoutError::render(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| LayoutError::render("failed to allocate svg pixmap"))?;

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Bitmap::from_raw(width, height, pixmap.take())
        .ok_or_else(|| LayoutError::render("svg pixmap size mismatch"))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/svg.rs"]
mod tests;

use image::imageops::{self, FilterType};

use crate::foundation::math::mul_div255_u8;

/// Premultiplied RGBA8 raster used for every intermediate image in the engine.
pub type Bitmap = image::RgbaImage;

/// Fully transparent bitmap.
pub fn transparent(width: u32, height: u32) -> Bitmap {
    Bitmap::new(width, height)
}

/// Resample to exactly `width x height`. Degenerate targets yield a 1x1 transparent bitmap.
pub fn resize(src: &Bitmap, width: u32, height: u32) -> Bitmap {
    if width == 0 || height == 0 || src.width() == 0 || src.height() == 0 {
        return transparent(width.max(1), height.max(1));
    }
    if src.dimensions() == (width, height) {
        return src.clone();
    }
    imageops::resize(src, width, height, FilterType::Triangle)
}

/// Mirror image content left to right.
pub fn flip_horizontal(src: &Bitmap) -> Bitmap {
    imageops::flip_horizontal(src)
}

/// Scale every channel by `alpha / 255`.
pub fn multiply_alpha(bitmap: &mut Bitmap, alpha: u8) {
    if alpha == u8::MAX {
        return;
    }
    let a = u16::from(alpha);
    for c in bitmap.iter_mut() {
        *c = mul_div255_u8(u16::from(*c), a);
    }
}

/// Bounding box `(x0, y0, x1, y1)` (exclusive max) of pixels with non-zero alpha.
pub fn opaque_bounds(bitmap: &Bitmap) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in bitmap.enumerate_pixels() {
        if px.0[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x + 1, y + 1),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
        });
    }
    bounds
}

/// Crop to [`opaque_bounds`]; a fully transparent bitmap is returned unchanged.
pub fn crop_to_opaque(bitmap: Bitmap) -> Bitmap {
    match opaque_bounds(&bitmap) {
        Some((x0, y0, x1, y1)) if (x0, y0, x1, y1) != (0, 0, bitmap.width(), bitmap.height()) => {
            imageops::crop_imm(&bitmap, x0, y0, x1 - x0, y1 - y0).to_image()
        }
        _ => bitmap,
    }
}

/// Largest size with the aspect ratio of `(width, height)` that fits inside `(max_w, max_h)`.
///
/// Never enlarges: a source that already fits is returned as is.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width <= max_w && height <= max_h {
        return (width, height);
    }
    if width == 0 || height == 0 {
        return (width.min(max_w), height.min(max_h));
    }
    let s = (f64::from(max_w) / f64::from(width)).min(f64::from(max_h) / f64::from(height));
    let w = ((f64::from(width) * s).round() as u32).clamp(1, max_w.max(1));
    let h = ((f64::from(height) * s).round() as u32).clamp(1, max_h.max(1));
    (w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/bitmap.rs"]
mod tests;

use crate::foundation::error::{LayoutError, LayoutResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::raster::bitmap::Bitmap;

/// A generated overlay frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub(crate) fn from_bitmap(bitmap: Bitmap) -> Self {
        let (width, height) = bitmap.dimensions();
        Self {
            width,
            height,
            data: bitmap.into_raw(),
            premultiplied: true,
        }
    }

    /// Pixel at `(x, y)` as stored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as image files expect.
    pub fn to_straight_rgba(&self) -> LayoutResult<Vec<u8>> {
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if self.data.len() != expected {
            return Err(LayoutError::validation(format!(
                "frame buffer has {} bytes, expected {expected}",
                self.data.len()
            )));
        }
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        Ok(out)
    }
}

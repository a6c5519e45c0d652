use crate::foundation::error::{LayoutError, LayoutResult};

pub use kurbo::{Point, Rect, Vec2};

/// Design canvas dimensions in design units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in design units.
    pub width: u32,
    /// Height in design units.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas (both sides > 0).
    pub fn new(width: u32, height: u32) -> LayoutResult<Self> {
        if width == 0 || height == 0 {
            return Err(LayoutError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Canvas dimensions multiplied by `scale`.
    pub fn scaled(self, scale: ScaleFactor) -> (u32, u32) {
        (scale.apply_u32(self.width), scale.apply_u32(self.height))
    }

    /// The whole canvas as a rectangle anchored at the origin.
    pub fn rect(self) -> LayoutRect {
        LayoutRect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// A `width x height` rectangle centered on the canvas.
    pub fn centered(self, width: u32, height: u32) -> LayoutRect {
        let left = (self.width as i32 - width as i32) / 2;
        let top = (self.height as i32 - height as i32) / 2;
        LayoutRect::from_origin_size(left, top, width, height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
        }
    }
}

/// Integer multiplier from design units to output pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ScaleFactor(u32);

impl ScaleFactor {
    /// Design resolution.
    pub const X1: Self = Self(1);
    /// Double resolution (960x540 design → 1920x1080 output).
    pub const X2: Self = Self(2);

    /// Create a validated scale factor (>= 1).
    pub fn new(factor: u32) -> LayoutResult<Self> {
        if factor == 0 {
            return Err(LayoutError::validation("scale factor must be >= 1"));
        }
        Ok(Self(factor))
    }

    /// Raw multiplier.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Scale a signed design coordinate.
    pub fn apply(self, v: i32) -> i64 {
        i64::from(v) * i64::from(self.0)
    }

    /// Scale an unsigned design length.
    pub fn apply_u32(self, v: u32) -> u32 {
        v.saturating_mul(self.0)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::X2
    }
}

impl TryFrom<u32> for ScaleFactor {
    type Error = LayoutError;

    fn try_from(v: u32) -> LayoutResult<Self> {
        Self::new(v)
    }
}

impl From<ScaleFactor> for u32 {
    fn from(s: ScaleFactor) -> u32 {
        s.0
    }
}

/// Axis-aligned integer rectangle `[left, top, right, bottom]` in design units.
///
/// Serialized as a 4-element array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct LayoutRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl LayoutRect {
    /// Rectangle from its four edges.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle from its top-left corner and size.
    pub fn from_origin_size(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self::new(left, top, left + width as i32, top + height as i32)
    }

    /// `right - left` (may be <= 0 for degenerate candidates). Saturates at the `i32` range.
    pub fn width(self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// `bottom - top` (may be <= 0 for degenerate candidates). Saturates at the `i32` range.
    pub fn height(self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// `(width, height)`, or `None` when either span does not fit in `i32`.
    pub fn checked_size(self) -> Option<(i32, i32)> {
        Some((
            self.right.checked_sub(self.left)?,
            self.bottom.checked_sub(self.top)?,
        ))
    }

    /// Return `true` when both spans fit in `i32`, are positive and equal `(width, height)`.
    pub fn has_size(self, width: u32, height: u32) -> bool {
        self.checked_size().is_some_and(|(w, h)| {
            w > 0 && h > 0 && i64::from(w) == i64::from(width) && i64::from(h) == i64::from(height)
        })
    }

    /// Return `true` when both sides are strictly larger than `min`.
    pub fn exceeds(self, min: i32) -> bool {
        self.width() > min && self.height() > min
    }

    /// Same size, moved by `(dx, dy)`. Edges saturate at the `i32` range.
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left.saturating_add(dx),
            self.top.saturating_add(dy),
            self.right.saturating_add(dx),
            self.bottom.saturating_add(dy),
        )
    }

    /// Same top-left corner, new size.
    pub fn with_size(self, width: u32, height: u32) -> Self {
        Self::from_origin_size(self.left, self.top, width, height)
    }

    /// Floating-point view for hit testing.
    pub fn to_kurbo(self) -> Rect {
        Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }

    /// Half-open containment test for a pointer position.
    pub fn contains(self, p: Point) -> bool {
        self.to_kurbo().contains(p)
    }

    /// Which edges of this rectangle lie outside `canvas`.
    pub fn bounds_flags(self, canvas: Canvas) -> BoundsFlags {
        BoundsFlags {
            left: self.left < 0,
            top: self.top < 0,
            right: self.right > canvas.width as i32,
            bottom: self.bottom > canvas.height as i32,
        }
    }
}

impl From<[i32; 4]> for LayoutRect {
    fn from([left, top, right, bottom]: [i32; 4]) -> Self {
        Self::new(left, top, right, bottom)
    }
}

impl From<LayoutRect> for [i32; 4] {
    fn from(r: LayoutRect) -> Self {
        [r.left, r.top, r.right, r.bottom]
    }
}

/// Edges of a rectangle that extend past the design canvas.
///
/// Informational for elements; for collections any flag blocks saving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundsFlags {
    /// `left < 0`.
    pub left: bool,
    /// `top < 0`.
    pub top: bool,
    /// `right > canvas.width`.
    pub right: bool,
    /// `bottom > canvas.height`.
    pub bottom: bool,
}

impl BoundsFlags {
    /// Return `true` when any edge is outside the canvas.
    pub fn any(self) -> bool {
        self.left || self.top || self.right || self.bottom
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

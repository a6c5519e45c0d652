use crate::foundation::core::{LayoutRect, Point, Rect};

/// One of the eight resize grips around a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Top-left corner.
    TopLeft,
    /// Top edge midpoint.
    Top,
    /// Top-right corner.
    TopRight,
    /// Right edge midpoint.
    Right,
    /// Bottom-right corner.
    BottomRight,
    /// Bottom edge midpoint.
    Bottom,
    /// Bottom-left corner.
    BottomLeft,
    /// Left edge midpoint.
    Left,
}

impl Handle {
    /// Every handle, clockwise from the top-left corner.
    pub const ALL: [Self; 8] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
    ];

    fn edges(self) -> (bool, bool, bool, bool) {
        // (left, top, right, bottom)
        match self {
            Self::TopLeft => (true, true, false, false),
            Self::Top => (false, true, false, false),
            Self::TopRight => (false, true, true, false),
            Self::Right => (false, false, true, false),
            Self::BottomRight => (false, false, true, true),
            Self::Bottom => (false, false, false, true),
            Self::BottomLeft => (true, false, false, true),
            Self::Left => (true, false, false, false),
        }
    }

    /// Center of the grip on `rect`.
    pub fn anchor(self, rect: LayoutRect) -> Point {
        let r = rect.to_kurbo();
        let c = r.center();
        let (l, t, rt, b) = self.edges();
        let x = if l {
            r.x0
        } else if rt {
            r.x1
        } else {
            c.x
        };
        let y = if t {
            r.y0
        } else if b {
            r.y1
        } else {
            c.y
        };
        Point::new(x, y)
    }

    /// Square hit area of half-size `radius` around the grip.
    pub fn hit_rect(self, rect: LayoutRect, radius: f64) -> Rect {
        Rect::from_center_size(self.anchor(rect), (radius * 2.0, radius * 2.0))
    }

    /// Candidate rectangle with the edges this handle controls moved to `pointer` (rounded).
    ///
    /// The candidate is not validated; callers discard degenerate results.
    pub fn apply(self, rect: LayoutRect, pointer: Point) -> LayoutRect {
        let px = pointer.x.round() as i32;
        let py = pointer.y.round() as i32;
        let (l, t, r, b) = self.edges();
        LayoutRect::new(
            if l { px } else { rect.left },
            if t { py } else { rect.top },
            if r { px } else { rect.right },
            if b { py } else { rect.bottom },
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/handles.rs"]
mod tests;

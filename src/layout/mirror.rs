use crate::foundation::core::{LayoutRect, ScaleFactor};

/// Horizontal mirror shared by the editor preview and frame generation.
///
/// Mirroring reflects element positions about the collection's span (the largest element right
/// edge) and flips element content. An unmirrored transform is the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MirrorTransform {
    span: i32,
    mirrored: bool,
}

impl MirrorTransform {
    /// Transform for a set of element rectangles.
    pub fn for_elements(rects: impl IntoIterator<Item = LayoutRect>, mirrored: bool) -> Self {
        let span = rects.into_iter().map(|r| r.right).max().unwrap_or(0);
        Self { span, mirrored }
    }

    /// Return `true` when positions and content are reflected.
    pub fn is_mirrored(self) -> bool {
        self.mirrored
    }

    /// Largest element right edge.
    pub fn span(self) -> i32 {
        self.span
    }

    /// Design-unit x of an element's left edge after mirroring.
    pub fn element_x(self, rect: LayoutRect) -> i32 {
        if self.mirrored {
            self.span - rect.right
        } else {
            rect.left
        }
    }

    /// Output-pixel x of an element's left edge.
    pub fn element_x_scaled(self, rect: LayoutRect, scale: ScaleFactor) -> i64 {
        scale.apply(self.element_x(rect))
    }
}

/// Output-pixel x at which a collection is placed.
///
/// Mirrored collections are reflected about the output frame:
/// `output_width - left * scale - width * scale`.
pub fn placement_x(
    output_width: u32,
    left: i32,
    width: u32,
    scale: ScaleFactor,
    mirrored: bool,
) -> i64 {
    if mirrored {
        i64::from(output_width) - scale.apply(left) - i64::from(scale.apply_u32(width))
    } else {
        scale.apply(left)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/mirror.rs"]
mod tests;

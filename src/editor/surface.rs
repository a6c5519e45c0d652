use crate::foundation::core::{Canvas, LayoutRect};
use crate::foundation::error::LayoutResult;

/// Something the placement controller can select, move, resize and re-layer.
///
/// Implemented by collections (their elements) and boards (their collections).
pub trait PlacementSurface {
    /// Item identifier.
    type Id: Clone + Eq + std::fmt::Debug;

    /// Canvas item rectangles are checked against.
    fn canvas(&self) -> Canvas;

    /// Current rectangle of an item.
    fn item_rect(&self, id: &Self::Id) -> Option<LayoutRect>;

    /// Translate an item; returns the new rectangle.
    fn move_item(&mut self, id: &Self::Id, dx: i32, dy: i32) -> LayoutResult<LayoutRect>;

    /// Replace an item's rectangle during a handle drag; returns the new rectangle.
    fn resize_item(&mut self, id: &Self::Id, rect: LayoutRect) -> LayoutResult<LayoutRect>;

    /// Called once when a handle drag ends so derived bitmaps can be rebuilt.
    fn finish_resize(&mut self, id: &Self::Id) -> LayoutResult<()>;

    /// Item ids back to front.
    fn paint_order(&self) -> Vec<Self::Id>;

    /// Move an item one layer toward the front (`true`) or back; `false` when nothing moved.
    fn reorder(&mut self, id: &Self::Id, toward_front: bool) -> bool;
}

use std::collections::HashSet;
use std::sync::Arc;

use crate::editor::surface::PlacementSurface;
use crate::foundation::core::{Canvas, LayoutRect, ScaleFactor};
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::foundation::ids::{CollectionId, ElementId};
use crate::layout::element::LayoutElement;
use crate::layout::mirror::{MirrorTransform, placement_x};
use crate::raster::bitmap::{self, Bitmap};
use crate::raster::composite::paste_over;
use crate::text::raster::TextRasterizer;

/// Named, ordered group of elements placed and mirrored as one unit.
///
/// Element index 0 is the topmost layer. The placement rectangle positions the collection on the
/// output canvas in design units.
#[derive(Clone, Debug)]
pub struct LayoutCollection {
    id: CollectionId,
    name: String,
    canvas: Canvas,
    elements: Vec<LayoutElement>,
    mirror: bool,
    rect: LayoutRect,
    preview: Option<Arc<Bitmap>>,
}

impl LayoutCollection {
    /// Build a collection, render its preview and center it on `canvas` at the preview size.
    pub fn new(
        name: impl Into<String>,
        elements: Vec<LayoutElement>,
        canvas: Canvas,
        rasterizer: &TextRasterizer,
    ) -> LayoutResult<Self> {
        if elements.is_empty() {
            return Err(LayoutError::validation("collection needs at least one element"));
        }
        check_unique_ids(&elements)?;
        let mut collection = Self {
            id: CollectionId::generate(),
            name: name.into(),
            canvas,
            elements,
            mirror: false,
            rect: LayoutRect::default(),
            preview: None,
        };
        let preview = collection.build_preview(rasterizer)?;
        collection.rect = canvas.centered(preview.width(), preview.height());
        Ok(collection)
    }

    pub(crate) fn from_parts(
        id: CollectionId,
        name: String,
        canvas: Canvas,
        elements: Vec<LayoutElement>,
        mirror: bool,
        rect: LayoutRect,
    ) -> LayoutResult<Self> {
        if elements.is_empty() {
            return Err(LayoutError::validation(format!(
                "collection {id} has no elements"
            )));
        }
        check_unique_ids(&elements)?;
        if !rect.checked_size().is_some_and(|(w, h)| w > 0 && h > 0) {
            return Err(LayoutError::validation(format!(
                "collection {id} must have positive size"
            )));
        }
        Ok(Self {
            id,
            name,
            canvas,
            elements,
            mirror,
            rect,
            preview: None,
        })
    }

    /// Identity.
    pub fn id(&self) -> &CollectionId {
        &self.id
    }

    /// Display name, unique within its board.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Design canvas the collection was authored on.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Elements, topmost first.
    pub fn elements(&self) -> &[LayoutElement] {
        &self.elements
    }

    /// Element by id.
    pub fn element(&self, id: &ElementId) -> Option<&LayoutElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Mutable element by id. Marks the preview stale.
    pub fn element_mut(&mut self, id: &ElementId) -> Option<&mut LayoutElement> {
        let element = self.elements.iter_mut().find(|e| e.id() == id)?;
        self.preview = None;
        Some(element)
    }

    /// Whether the collection is mirrored.
    pub fn mirror(&self) -> bool {
        self.mirror
    }

    /// Placement rectangle on the output canvas, in design units.
    pub fn rect(&self) -> LayoutRect {
        self.rect
    }

    /// Display width in design units.
    pub fn width(&self) -> u32 {
        self.rect.width() as u32
    }

    /// Display height in design units.
    pub fn height(&self) -> u32 {
        self.rect.height() as u32
    }

    /// Last built preview, or `None` when stale.
    pub fn preview(&self) -> Option<&Arc<Bitmap>> {
        self.preview.as_ref()
    }

    /// Mirror transform for the current elements and mirror flag.
    pub fn mirror_transform(&self) -> MirrorTransform {
        MirrorTransform::for_elements(self.elements.iter().map(LayoutElement::rect), self.mirror)
    }

    /// Output-pixel x where the collection is pasted.
    pub fn placement_x(&self, output_width: u32, scale: ScaleFactor) -> i64 {
        placement_x(output_width, self.rect.left, self.width(), scale, self.mirror)
    }

    /// Insert on top. Fails when an element with the same id is already present.
    pub fn add_element(&mut self, element: LayoutElement) -> LayoutResult<()> {
        if self.element(element.id()).is_some() {
            return Err(LayoutError::validation(format!(
                "collection {} already has element {}",
                self.id,
                element.id()
            )));
        }
        self.elements.insert(0, element);
        self.preview = None;
        Ok(())
    }

    /// Remove and return an element.
    pub fn remove_element(&mut self, id: &ElementId) -> Option<LayoutElement> {
        let idx = self.elements.iter().position(|e| e.id() == id)?;
        self.preview = None;
        Some(self.elements.remove(idx))
    }

    /// Swap an element with its neighbor toward the front (`true`) or back.
    ///
    /// Returns `false`, leaving the order untouched, at either end or for an unknown id.
    pub fn reorder(&mut self, id: &ElementId, toward_front: bool) -> bool {
        let Some(idx) = self.elements.iter().position(|e| e.id() == id) else {
            return false;
        };
        let other = if toward_front {
            match idx.checked_sub(1) {
                Some(i) => i,
                None => return false,
            }
        } else if idx + 1 < self.elements.len() {
            idx + 1
        } else {
            return false;
        };
        self.elements.swap(idx, other);
        self.preview = None;
        true
    }

    /// Paint elements back to front on a transparent design-canvas bitmap and crop to the
    /// painted area.
    pub fn build_preview(&mut self, rasterizer: &TextRasterizer) -> LayoutResult<Arc<Bitmap>> {
        let transform = self.mirror_transform();
        let mut canvas = bitmap::transparent(self.canvas.width, self.canvas.height);
        for element in self.elements.iter_mut().rev() {
            let rect = element.rect();
            let x = i64::from(transform.element_x(rect));
            let y = i64::from(rect.top);
            let alpha = element.alpha();
            let layer = element.preview_bitmap(self.mirror, rasterizer)?;
            if alpha < u8::MAX {
                let mut faded = (*layer).clone();
                bitmap::multiply_alpha(&mut faded, alpha);
                paste_over(&mut canvas, &faded, x, y);
            } else {
                paste_over(&mut canvas, &layer, x, y);
            }
        }
        let preview = Arc::new(bitmap::crop_to_opaque(canvas));
        self.preview = Some(Arc::clone(&preview));
        tracing::debug!(
            collection = %self.id,
            width = preview.width(),
            height = preview.height(),
            "preview built"
        );
        Ok(preview)
    }

    /// Preview at the current display size, rebuilding it first when stale.
    pub fn display_preview(&mut self, rasterizer: &TextRasterizer) -> LayoutResult<Bitmap> {
        let preview = match &self.preview {
            Some(p) => Arc::clone(p),
            None => self.build_preview(rasterizer)?,
        };
        Ok(bitmap::resize(&preview, self.width(), self.height()))
    }

    /// Flip the mirror flag and rebuild the preview.
    pub fn toggle_mirror(&mut self, rasterizer: &TextRasterizer) -> LayoutResult<()> {
        self.mirror = !self.mirror;
        self.build_preview(rasterizer)?;
        Ok(())
    }

    /// Resize the placement keeping its top-left corner.
    pub fn set_display_size(&mut self, width: u32, height: u32) -> LayoutResult<()> {
        self.set_rect(self.rect.with_size(width, height))
    }

    /// Move the placement.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.rect = self.rect.translated(dx, dy);
    }

    /// Replace the placement rectangle.
    pub fn set_rect(&mut self, rect: LayoutRect) -> LayoutResult<()> {
        if !rect.checked_size().is_some_and(|(w, h)| w > 0 && h > 0) {
            return Err(LayoutError::validation(
                "collection placement must have positive size",
            ));
        }
        self.rect = rect;
        Ok(())
    }
}

/// Items are addressed by id, so ids must not repeat inside one collection.
fn check_unique_ids(elements: &[LayoutElement]) -> LayoutResult<()> {
    let mut seen = HashSet::new();
    for e in elements {
        if !seen.insert(e.id()) {
            return Err(LayoutError::validation(format!(
                "duplicate element id {} in collection",
                e.id()
            )));
        }
    }
    Ok(())
}

impl PlacementSurface for LayoutCollection {
    type Id = ElementId;

    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn item_rect(&self, id: &ElementId) -> Option<LayoutRect> {
        self.element(id).map(LayoutElement::rect)
    }

    fn move_item(&mut self, id: &ElementId, dx: i32, dy: i32) -> LayoutResult<LayoutRect> {
        let element = self
            .element_mut(id)
            .ok_or_else(|| LayoutError::validation(format!("unknown element {id}")))?;
        element.translate(dx, dy);
        Ok(element.rect())
    }

    fn resize_item(&mut self, id: &ElementId, rect: LayoutRect) -> LayoutResult<LayoutRect> {
        let element = self
            .element_mut(id)
            .ok_or_else(|| LayoutError::validation(format!("unknown element {id}")))?;
        element.set_rect(rect)?;
        Ok(element.rect())
    }

    fn finish_resize(&mut self, id: &ElementId) -> LayoutResult<()> {
        let element = self
            .element_mut(id)
            .ok_or_else(|| LayoutError::validation(format!("unknown element {id}")))?;
        element.invalidate_display();
        Ok(())
    }

    fn paint_order(&self) -> Vec<ElementId> {
        self.elements.iter().rev().map(|e| e.id().clone()).collect()
    }

    fn reorder(&mut self, id: &ElementId, toward_front: bool) -> bool {
        LayoutCollection::reorder(self, id, toward_front)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/collection.rs"]
mod tests;

use std::path::Path;

use crate::editor::surface::PlacementSurface;
use crate::foundation::core::{Canvas, LayoutRect};
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::foundation::ids::{CollectionId, ElementId};
use crate::layout::collection::LayoutCollection;
use crate::layout::element::LayoutElement;
use crate::layout::snapshot::{CollectionSnapshot, ElementSnapshot, LayoutDocument};
use crate::text::raster::TextRasterizer;

/// Owner of every collection in a layout.
///
/// Collections are painted in board order: index 0 first, the last one on top.
#[derive(Clone, Debug, Default)]
pub struct LayoutBoard {
    canvas: Canvas,
    collections: Vec<LayoutCollection>,
}

impl LayoutBoard {
    /// Empty board on `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            collections: Vec::new(),
        }
    }

    /// Design canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Collections in paint order.
    pub fn collections(&self) -> &[LayoutCollection] {
        &self.collections
    }

    /// Collection by id.
    pub fn collection(&self, id: &CollectionId) -> Option<&LayoutCollection> {
        self.collections.iter().find(|c| c.id() == id)
    }

    /// Mutable collection by id.
    pub fn collection_mut(&mut self, id: &CollectionId) -> Option<&mut LayoutCollection> {
        self.collections.iter_mut().find(|c| c.id() == id)
    }

    /// Collection by display name.
    pub fn collection_by_name(&self, name: &str) -> Option<&LayoutCollection> {
        self.collections.iter().find(|c| c.name() == name)
    }

    /// Group `elements` into a new collection on top of the board.
    ///
    /// The name is made unique, the preview is built and the collection is centered on the
    /// canvas at the preview size.
    pub fn add_collection(
        &mut self,
        name: &str,
        elements: Vec<LayoutElement>,
        rasterizer: &TextRasterizer,
    ) -> LayoutResult<CollectionId> {
        let name = self.unique_name(name);
        let collection = LayoutCollection::new(name, elements, self.canvas, rasterizer)?;
        let id = collection.id().clone();
        tracing::info!(collection = %id, name = collection.name(), "collection added");
        self.collections.push(collection);
        Ok(id)
    }

    /// Remove and return a collection.
    pub fn remove_collection(&mut self, id: &CollectionId) -> Option<LayoutCollection> {
        let idx = self.collections.iter().position(|c| c.id() == id)?;
        Some(self.collections.remove(idx))
    }

    /// Remove an element; a collection left empty is removed with it.
    pub fn remove_element(
        &mut self,
        collection: &CollectionId,
        element: &ElementId,
    ) -> LayoutResult<LayoutElement> {
        let owner = self
            .collection_mut(collection)
            .ok_or_else(|| LayoutError::validation(format!("unknown collection {collection}")))?;
        let removed = owner.remove_element(element).ok_or_else(|| {
            LayoutError::validation(format!("collection {collection} has no element {element}"))
        })?;
        if owner.elements().is_empty() {
            self.remove_collection(collection);
            tracing::debug!(collection = %collection, "emptied collection removed");
        }
        Ok(removed)
    }

    /// `name`, or `name_N` with the smallest `N >= 1` not already taken.
    pub fn unique_name(&self, name: &str) -> String {
        dedup_name(name, |candidate| {
            self.collections.iter().any(|c| c.name() == candidate)
        })
    }

    /// Rename a collection, deduplicating against the others. Returns the name applied.
    pub fn rename_collection(&mut self, id: &CollectionId, name: &str) -> LayoutResult<String> {
        let unique = dedup_name(name, |candidate| {
            self.collections
                .iter()
                .any(|c| c.id() != id && c.name() == candidate)
        });
        let collection = self
            .collection_mut(id)
            .ok_or_else(|| LayoutError::validation(format!("unknown collection {id}")))?;
        collection.set_name(unique.clone());
        Ok(unique)
    }

    /// Collections whose placement leaves the canvas.
    pub fn out_of_bounds(&self) -> Vec<CollectionId> {
        self.collections
            .iter()
            .filter(|c| c.rect().bounds_flags(self.canvas).any())
            .map(|c| c.id().clone())
            .collect()
    }

    /// Fail with [`LayoutError::OutOfBounds`] when any collection leaves the canvas.
    pub fn validate_for_save(&self) -> LayoutResult<()> {
        let out = self.out_of_bounds();
        if out.is_empty() {
            Ok(())
        } else {
            Err(LayoutError::OutOfBounds(out))
        }
    }

    /// Snapshot of the whole board.
    pub fn to_document(&self) -> LayoutDocument {
        LayoutDocument {
            canvas: self.canvas,
            collections: self
                .collections
                .iter()
                .map(|c| CollectionSnapshot {
                    id: c.id().clone(),
                    name: c.name().to_string(),
                    mirror: c.mirror(),
                    position: c.rect(),
                    width: c.width(),
                    height: c.height(),
                    elements: c.elements().iter().map(ElementSnapshot::from).collect(),
                })
                .collect(),
        }
    }

    /// Rebuild a board from a snapshot. Previews and display caches are rebuilt lazily.
    pub fn from_document(doc: LayoutDocument) -> LayoutResult<Self> {
        let canvas = Canvas::new(doc.canvas.width, doc.canvas.height)?;
        let mut board = Self::new(canvas);
        for snap in doc.collections {
            if board.collection(&snap.id).is_some() {
                return Err(LayoutError::validation(format!(
                    "duplicate collection id {}",
                    snap.id
                )));
            }
            if !snap.position.has_size(snap.width, snap.height) {
                return Err(LayoutError::validation(format!(
                    "collection {}: size {}x{} does not match position",
                    snap.id, snap.width, snap.height
                )));
            }
            let elements = snap
                .elements
                .into_iter()
                .map(LayoutElement::try_from)
                .collect::<LayoutResult<Vec<_>>>()?;
            let name = board.unique_name(&snap.name);
            let collection = LayoutCollection::from_parts(
                snap.id,
                name,
                canvas,
                elements,
                snap.mirror,
                snap.position,
            )?;
            board.collections.push(collection);
        }
        Ok(board)
    }

    /// Validate bounds and write the board to `path`.
    pub fn save(&self, path: &Path) -> LayoutResult<()> {
        self.validate_for_save()?;
        self.to_document().to_path(path)
    }

    /// Read a board from `path`.
    pub fn load(path: &Path) -> LayoutResult<Self> {
        Self::from_document(LayoutDocument::from_path(path)?)
    }
}

impl PlacementSurface for LayoutBoard {
    type Id = CollectionId;

    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn item_rect(&self, id: &CollectionId) -> Option<LayoutRect> {
        self.collection(id).map(LayoutCollection::rect)
    }

    fn move_item(&mut self, id: &CollectionId, dx: i32, dy: i32) -> LayoutResult<LayoutRect> {
        let collection = self
            .collection_mut(id)
            .ok_or_else(|| LayoutError::validation(format!("unknown collection {id}")))?;
        collection.translate(dx, dy);
        Ok(collection.rect())
    }

    fn resize_item(&mut self, id: &CollectionId, rect: LayoutRect) -> LayoutResult<LayoutRect> {
        let collection = self
            .collection_mut(id)
            .ok_or_else(|| LayoutError::validation(format!("unknown collection {id}")))?;
        collection.set_rect(rect)?;
        Ok(collection.rect())
    }

    fn finish_resize(&mut self, id: &CollectionId) -> LayoutResult<()> {
        if self.collection(id).is_none() {
            return Err(LayoutError::validation(format!("unknown collection {id}")));
        }
        Ok(())
    }

    fn paint_order(&self) -> Vec<CollectionId> {
        self.collections.iter().map(|c| c.id().clone()).collect()
    }

    fn reorder(&mut self, id: &CollectionId, toward_front: bool) -> bool {
        let Some(idx) = self.collections.iter().position(|c| c.id() == id) else {
            return false;
        };
        let other = if toward_front {
            if idx + 1 < self.collections.len() {
                idx + 1
            } else {
                return false;
            }
        } else {
            match idx.checked_sub(1) {
                Some(i) => i,
                None => return false,
            }
        };
        self.collections.swap(idx, other);
        true
    }
}

fn dedup_name(name: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(name) {
        return name.to_string();
    }
    (1u32..)
        .map(|n| format!("{name}_{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/board.rs"]
mod tests;

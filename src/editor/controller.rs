use crate::editor::handles::Handle;
use crate::editor::surface::PlacementSurface;
use crate::foundation::core::{BoundsFlags, LayoutRect, Point, Rect};

/// Tunables for pointer interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerOpts {
    /// Half-size of each square resize grip, in design units.
    pub handle_radius: f64,
    /// Resize candidates must be strictly larger than this on both axes.
    pub min_size: i32,
}

impl Default for ControllerOpts {
    fn default() -> Self {
        Self {
            handle_radius: 3.0,
            min_size: 5,
        }
    }
}

/// What a pointer press landed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HitTarget<Id> {
    /// Empty canvas.
    Nothing,
    /// The body of an item.
    Body(Id),
    /// A grip of the current selection.
    Handle(Handle),
}

/// Interaction state.
#[derive(Clone, Debug, PartialEq)]
pub enum ControllerState<Id> {
    /// No selection.
    Idle,
    /// An item is selected. `pressed` holds the selecting press while the button is down.
    Selected {
        /// Selected item.
        id: Id,
        /// Position of the press that selected the item, if still held.
        pressed: Option<Point>,
    },
    /// The selected item follows the pointer.
    Dragging {
        /// Dragged item.
        id: Id,
        /// Pointer position already applied to the item.
        last: Point,
    },
    /// A grip of the selected item follows the pointer.
    Resizing {
        /// Resized item.
        id: Id,
        /// Grip being dragged.
        handle: Handle,
    },
}

impl<Id> ControllerState<Id> {
    /// Item the state refers to, if any.
    pub fn id(&self) -> Option<&Id> {
        match self {
            Self::Idle => None,
            Self::Selected { id, .. } | Self::Dragging { id, .. } | Self::Resizing { id, .. } => {
                Some(id)
            }
        }
    }
}

/// Selection outline and its eight grips.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionOverlay {
    /// Outline of the selected item.
    pub rect: LayoutRect,
    /// Hit rectangles, in [`Handle::ALL`] order.
    pub handles: [(Handle, Rect); 8],
}

impl SelectionOverlay {
    fn new(rect: LayoutRect, radius: f64) -> Self {
        Self {
            rect,
            handles: Handle::ALL.map(|h| (h, h.hit_rect(rect, radius))),
        }
    }

    /// Grip under `point`, if any.
    pub fn handle_at(&self, point: Point) -> Option<Handle> {
        self.handles
            .iter()
            .find(|(_, r)| r.contains(point))
            .map(|(h, _)| *h)
    }
}

/// Geometry change reported after a move or resize.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementUpdate<Id> {
    /// Item that changed.
    pub id: Id,
    /// Its new rectangle.
    pub rect: LayoutRect,
    /// Edges now outside the canvas. Never corrected automatically.
    pub bounds: BoundsFlags,
}

/// Pointer-driven select / drag / resize / re-layer state machine.
///
/// The controller never owns items; every operation is applied to a [`PlacementSurface`]
/// passed in by the host. Rejected geometry is dropped without an error.
#[derive(Clone, Debug)]
pub struct PlacementController<Id> {
    opts: ControllerOpts,
    state: ControllerState<Id>,
    overlay: Option<SelectionOverlay>,
}

impl<Id> Default for PlacementController<Id> {
    fn default() -> Self {
        Self::new(ControllerOpts::default())
    }
}

impl<Id> PlacementController<Id> {
    /// Idle controller.
    pub fn new(opts: ControllerOpts) -> Self {
        Self {
            opts,
            state: ControllerState::Idle,
            overlay: None,
        }
    }

    /// Interaction tunables.
    pub fn opts(&self) -> ControllerOpts {
        self.opts
    }

    /// Current interaction state.
    pub fn state(&self) -> &ControllerState<Id> {
        &self.state
    }

    /// Selection outline, present whenever an item is selected.
    pub fn overlay(&self) -> Option<&SelectionOverlay> {
        self.overlay.as_ref()
    }

    /// Currently selected item.
    pub fn selected(&self) -> Option<&Id> {
        self.state.id()
    }

    /// Drop the selection.
    pub fn deselect(&mut self) {
        self.state = ControllerState::Idle;
        self.overlay = None;
    }
}

impl<Id: Clone + Eq + std::fmt::Debug> PlacementController<Id> {
    /// Default hit test: grips of the selection first, then item bodies front to back.
    pub fn hit_test<S>(&self, surface: &S, point: Point) -> HitTarget<Id>
    where
        S: PlacementSurface<Id = Id>,
    {
        if self.selected().is_some()
            && let Some(handle) = self.overlay.as_ref().and_then(|o| o.handle_at(point))
        {
            return HitTarget::Handle(handle);
        }
        surface
            .paint_order()
            .into_iter()
            .rev()
            .find(|id| surface.item_rect(id).is_some_and(|r| r.contains(point)))
            .map_or(HitTarget::Nothing, HitTarget::Body)
    }

    /// Handle a button press at `point` on `hit`.
    pub fn pointer_down<S>(&mut self, surface: &S, point: Point, hit: HitTarget<Id>)
    where
        S: PlacementSurface<Id = Id>,
    {
        match hit {
            HitTarget::Nothing => {
                tracing::debug!("selection cleared");
                self.deselect();
            }
            HitTarget::Body(id) => {
                if self.selected() == Some(&id) {
                    tracing::debug!(?id, "drag started");
                    self.state = ControllerState::Dragging { id, last: point };
                    return;
                }
                let Some(rect) = surface.item_rect(&id) else {
                    self.deselect();
                    return;
                };
                tracing::debug!(?id, "selected");
                self.overlay = Some(SelectionOverlay::new(rect, self.opts.handle_radius));
                self.state = ControllerState::Selected {
                    id,
                    pressed: Some(point),
                };
            }
            HitTarget::Handle(handle) => {
                if let ControllerState::Selected { id, .. } = &self.state {
                    let id = id.clone();
                    tracing::debug!(?id, ?handle, "resize started");
                    self.state = ControllerState::Resizing { id, handle };
                }
            }
        }
    }

    /// Handle pointer motion; returns the geometry change, if any.
    pub fn pointer_move<S>(&mut self, surface: &mut S, point: Point) -> Option<PlacementUpdate<Id>>
    where
        S: PlacementSurface<Id = Id>,
    {
        if let ControllerState::Selected {
            id,
            pressed: Some(origin),
        } = &self.state
        {
            self.state = ControllerState::Dragging {
                id: id.clone(),
                last: *origin,
            };
        }

        match &mut self.state {
            ControllerState::Dragging { id, last } => {
                let dx = (point.x - last.x).round();
                let dy = (point.y - last.y).round();
                if dx == 0.0 && dy == 0.0 {
                    return None;
                }
                let id = id.clone();
                *last = Point::new(last.x + dx, last.y + dy);
                let rect = match surface.move_item(&id, dx as i32, dy as i32) {
                    Ok(rect) => rect,
                    Err(err) => {
                        tracing::warn!(?id, %err, "move ignored");
                        return None;
                    }
                };
                Some(self.report(surface, id, rect))
            }
            ControllerState::Resizing { id, handle } => {
                let id = id.clone();
                let current = surface.item_rect(&id)?;
                let candidate = handle.apply(current, point);
                if !candidate.exceeds(self.opts.min_size) {
                    return None;
                }
                let rect = match surface.resize_item(&id, candidate) {
                    Ok(rect) => rect,
                    Err(err) => {
                        tracing::warn!(?id, %err, "resize ignored");
                        return None;
                    }
                };
                Some(self.report(surface, id, rect))
            }
            ControllerState::Idle | ControllerState::Selected { .. } => None,
        }
    }

    /// Handle a button release. Ending a resize rebuilds the item and reports its geometry.
    pub fn pointer_up<S>(&mut self, surface: &mut S, _point: Point) -> Option<PlacementUpdate<Id>>
    where
        S: PlacementSurface<Id = Id>,
    {
        match std::mem::replace(&mut self.state, ControllerState::Idle) {
            ControllerState::Idle => None,
            ControllerState::Selected { id, .. } | ControllerState::Dragging { id, .. } => {
                self.state = ControllerState::Selected { id, pressed: None };
                None
            }
            ControllerState::Resizing { id, .. } => {
                if let Err(err) = surface.finish_resize(&id) {
                    tracing::warn!(?id, %err, "finish resize failed");
                }
                self.state = ControllerState::Selected {
                    id: id.clone(),
                    pressed: None,
                };
                let Some(rect) = surface.item_rect(&id) else {
                    self.deselect();
                    return None;
                };
                tracing::debug!(?id, ?rect, "resize finished");
                Some(self.report(surface, id, rect))
            }
        }
    }

    /// Move the selection one layer up; returns the new back-to-front order when it moved.
    pub fn bring_forward<S>(&mut self, surface: &mut S) -> Option<Vec<Id>>
    where
        S: PlacementSurface<Id = Id>,
    {
        self.relayer(surface, true)
    }

    /// Move the selection one layer down; returns the new back-to-front order when it moved.
    pub fn send_backward<S>(&mut self, surface: &mut S) -> Option<Vec<Id>>
    where
        S: PlacementSurface<Id = Id>,
    {
        self.relayer(surface, false)
    }

    fn relayer<S>(&mut self, surface: &mut S, toward_front: bool) -> Option<Vec<Id>>
    where
        S: PlacementSurface<Id = Id>,
    {
        let ControllerState::Selected { id, .. } = &self.state else {
            return None;
        };
        if !surface.reorder(id, toward_front) {
            return None;
        }
        Some(surface.paint_order())
    }

    fn report<S>(&mut self, surface: &S, id: Id, rect: LayoutRect) -> PlacementUpdate<Id>
    where
        S: PlacementSurface<Id = Id>,
    {
        self.overlay = Some(SelectionOverlay::new(rect, self.opts.handle_radius));
        PlacementUpdate {
            id,
            rect,
            bounds: rect.bounds_flags(surface.canvas()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/controller.rs"]
mod tests;

//! stream-overlay is a layout and compositing engine for broadcast overlays.
//!
//! Overlays are authored on a fixed design canvas as collections of elements (static images
//! and text, plus variable slots for player names, team names and counters). At broadcast time
//! the variable slots are bound to runtime values and the whole board is composited into a
//! single transparent frame:
//!
//! - Build or load a [`LayoutBoard`]
//! - Bind values through a [`ValueResolver`] (for example a [`MapResolver`])
//! - Run [`Compositor::generate`] and hand the [`FrameRGBA`] to a [`FrameSink`]
//!
//! Interactive placement is driven by [`PlacementController`] over any [`PlacementSurface`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Asset store, image decoding, fonts and colors.
pub mod assets;
/// Value binding, render cache and the compositor.
pub mod compose;
/// Pointer-driven placement editing.
pub mod editor;
/// Frame sinks.
pub mod encode;
/// Geometry, identifiers and errors.
pub mod foundation;
/// Elements, collections, the board and layout documents.
pub mod layout;
/// Premultiplied RGBA8 raster helpers.
pub mod raster;
/// Text styles and rasterization.
pub mod text;

pub use crate::assets::color::{HexColor, complement_hex};
pub use crate::assets::fonts::FontBook;
pub use crate::assets::store::AssetStore;
pub use crate::compose::compositor::{Compositor, CompositorOpts};
pub use crate::compose::frame::FrameRGBA;
pub use crate::compose::values::{MapResolver, Value, ValueResolver, ValuesFile};
pub use crate::editor::controller::{
    ControllerOpts, ControllerState, HitTarget, PlacementController, PlacementUpdate,
};
pub use crate::editor::handles::Handle;
pub use crate::editor::surface::PlacementSurface;
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSink, SinkConfig};
pub use crate::foundation::core::{BoundsFlags, Canvas, LayoutRect, Point, Rect, ScaleFactor};
pub use crate::foundation::error::{LayoutError, LayoutResult, UnboundReason, UnboundValue};
pub use crate::foundation::ids::{CollectionId, ElementId};
pub use crate::layout::board::LayoutBoard;
pub use crate::layout::collection::LayoutCollection;
pub use crate::layout::element::{
    Category, ElementInit, ElementKind, ElementSource, LayoutElement,
};
pub use crate::layout::snapshot::LayoutDocument;
pub use crate::raster::bitmap::Bitmap;
pub use crate::text::raster::{TextRasterizer, TextRasterizerOpts};
pub use crate::text::style::{Anchor, FontStyle};

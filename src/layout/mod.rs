//! Overlay layout model: elements, collections, the board and persistence.

/// Collection ownership, name dedup and save validation.
pub mod board;
/// Element groups with mirror state and previews.
pub mod collection;
/// Element variants, factory and rendering.
pub mod element;
/// Mirror transform shared by preview and generation.
pub mod mirror;
/// Placeholder boxes for variable elements.
pub mod placeholder;
/// JSON documents with embedded PNG bitmaps.
pub mod snapshot;

use std::collections::{HashMap, HashSet};

use crate::compose::cache::{RenderCache, RenderKey};
use crate::compose::frame::FrameRGBA;
use crate::compose::values::{Value, ValueResolver};
use crate::foundation::core::ScaleFactor;
use crate::foundation::error::{LayoutError, LayoutResult, UnboundValue};
use crate::foundation::math::{Fnv1a64, premultiply_rgba8_in_place};
use crate::layout::board::LayoutBoard;
use crate::layout::element::LayoutElement;
use crate::raster::bitmap::{self, Bitmap};
use crate::raster::composite::paste_over;
use crate::text::raster::TextRasterizer;

/// Options for [`Compositor`].
#[derive(Clone, Debug)]
pub struct CompositorOpts {
    /// Design-unit to output-pixel multiplier.
    pub scale: ScaleFactor,
    /// Straight RGBA8 color the frame is cleared to; transparent when `None`.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            scale: ScaleFactor::X2,
            clear_rgba: None,
        }
    }
}

/// Produces output frames from a [`LayoutBoard`] and a [`ValueResolver`].
///
/// The compositor never mutates the board. Element renders are cached per (collection, element)
/// and reused while size, scale, mirror state, style, content and bound value are unchanged.
#[derive(Debug, Default)]
pub struct Compositor {
    opts: CompositorOpts,
    cache: RenderCache,
}

impl Compositor {
    /// Compositor with `opts`.
    pub fn new(opts: CompositorOpts) -> Self {
        Self {
            opts,
            cache: RenderCache::default(),
        }
    }

    /// Active options.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Number of cached element renders.
    pub fn cached_renders(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached element render.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Check that every variable element resolves to a usable value.
    ///
    /// Fails with [`LayoutError::Unbound`] listing every offending element.
    #[tracing::instrument(skip(self, board, resolver))]
    pub fn preflight(
        &self,
        board: &LayoutBoard,
        resolver: &dyn ValueResolver,
    ) -> LayoutResult<()> {
        resolve_values(board, resolver).map(|_| ())
    }

    /// Generate one frame of `(canvas width x scale, canvas height x scale)`.
    ///
    /// Collections are painted in board order. Any failure aborts the whole generation and no
    /// frame is returned.
    #[tracing::instrument(
        skip(self, board, resolver, rasterizer),
        fields(collections = board.collections().len(), scale = self.opts.scale.get())
    )]
    pub fn generate(
        &mut self,
        board: &LayoutBoard,
        resolver: &dyn ValueResolver,
        rasterizer: &TextRasterizer,
    ) -> LayoutResult<FrameRGBA> {
        let values = resolve_values(board, resolver)?;
        let scale = self.opts.scale;
        let (out_w, out_h) = board.canvas().scaled(scale);

        let mut frame = bitmap::transparent(out_w, out_h);
        if let Some(rgba) = self.opts.clear_rgba {
            let mut px = rgba;
            premultiply_rgba8_in_place(&mut px);
            for p in frame.pixels_mut() {
                p.0 = px;
            }
        }

        let mut live = HashSet::new();
        for collection in board.collections() {
            let transform = collection.mirror_transform();
            let mirror = collection.mirror();
            let mut layer = bitmap::transparent(out_w, out_h);

            for element in collection.elements().iter().rev() {
                let key: RenderKey = (collection.id().clone(), element.id().clone());
                let value = values.get(&key);
                let fingerprint = render_fingerprint(element, value, mirror, scale);
                let rendered = self.cache.get_or_render(&key, fingerprint, || {
                    element.render_image(value, mirror, scale, rasterizer)
                })?;
                live.insert(key);

                let rect = element.rect();
                let x = transform.element_x_scaled(rect, scale);
                let y = scale.apply(rect.top);
                if element.alpha() < u8::MAX {
                    let mut faded: Bitmap = (*rendered).clone();
                    bitmap::multiply_alpha(&mut faded, element.alpha());
                    paste_over(&mut layer, &faded, x, y);
                } else {
                    paste_over(&mut layer, &rendered, x, y);
                }
            }

            let cropped = bitmap::crop_to_opaque(layer);
            let placed = bitmap::resize(
                &cropped,
                scale.apply_u32(collection.width()),
                scale.apply_u32(collection.height()),
            );
            let x = collection.placement_x(out_w, scale);
            let y = scale.apply(collection.rect().top);
            paste_over(&mut frame, &placed, x, y);
            tracing::debug!(collection = %collection.id(), x, y, mirror, "collection composited");
        }
        self.cache.retain_keys(&live);

        let (hits, misses) = self.cache.stats();
        tracing::info!(width = out_w, height = out_h, hits, misses, "frame generated");
        Ok(FrameRGBA::from_bitmap(frame))
    }
}

fn resolve_values(
    board: &LayoutBoard,
    resolver: &dyn ValueResolver,
) -> LayoutResult<HashMap<RenderKey, Value>> {
    let mut values = HashMap::new();
    let mut unbound = Vec::new();
    for collection in board.collections() {
        for element in collection.elements() {
            if !element.is_variable() {
                continue;
            }
            let value = resolver.resolve(collection, element);
            match element.check_value(value.as_ref()) {
                Ok(()) => {
                    if let Some(value) = value {
                        values.insert((collection.id().clone(), element.id().clone()), value);
                    }
                }
                Err(reason) => unbound.push(UnboundValue {
                    collection: collection.id().clone(),
                    element: element.id().clone(),
                    name: element.name().to_string(),
                    reason,
                }),
            }
        }
    }
    if unbound.is_empty() {
        Ok(values)
    } else {
        tracing::warn!(count = unbound.len(), "generation pre-flight failed");
        Err(LayoutError::Unbound(unbound))
    }
}

fn render_fingerprint(
    element: &LayoutElement,
    value: Option<&Value>,
    mirror: bool,
    scale: ScaleFactor,
) -> u64 {
    let mut h = Fnv1a64::new_default();
    element.render_fingerprint(&mut h);
    h.write_u32(scale.get());
    h.write_u8(u8::from(mirror));
    match value {
        None => h.write_u8(0),
        Some(Value::Text(s)) => {
            h.write_u8(1);
            h.write_str(s);
        }
        Some(Value::Image(img)) => {
            h.write_u8(2);
            h.write_u32(img.width());
            h.write_u32(img.height());
            h.write_bytes(img.as_raw());
        }
    }
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::foundation::error::LayoutResult;
use crate::foundation::ids::{CollectionId, ElementId};
use crate::raster::bitmap::Bitmap;

#[derive(Debug)]
struct CachedRender {
    fingerprint: u64,
    bitmap: Arc<Bitmap>,
}

/// Element ids are only unique within a collection.
pub(crate) type RenderKey = (CollectionId, ElementId);

/// Rendered element bitmaps keyed by owning collection and element, reused while the
/// fingerprint is unchanged.
#[derive(Debug, Default)]
pub(crate) struct RenderCache {
    entries: HashMap<RenderKey, CachedRender>,
    hits: u64,
    misses: u64,
}

impl RenderCache {
    pub(crate) fn get_or_render(
        &mut self,
        key: &RenderKey,
        fingerprint: u64,
        render: impl FnOnce() -> LayoutResult<Bitmap>,
    ) -> LayoutResult<Arc<Bitmap>> {
        if let Some(entry) = self.entries.get(key)
            && entry.fingerprint == fingerprint
        {
            self.hits += 1;
            return Ok(Arc::clone(&entry.bitmap));
        }
        self.misses += 1;
        let bitmap = Arc::new(render()?);
        self.entries.insert(
            key.clone(),
            CachedRender {
                fingerprint,
                bitmap: Arc::clone(&bitmap),
            },
        );
        Ok(bitmap)
    }

    /// Drop entries for elements that no longer exist.
    pub(crate) fn retain_keys(&mut self, live: &HashSet<RenderKey>) {
        self.entries.retain(|key, _| live.contains(key));
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/cache.rs"]
mod tests;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::assets::store::AssetStore;
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::foundation::ids::{CollectionId, ElementId};
use crate::layout::collection::LayoutCollection;
use crate::layout::element::{Category, LayoutElement};
use crate::raster::bitmap::Bitmap;

/// Runtime content bound to a variable element at generation time.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Text for text and counter-text elements, or a state key for counter images.
    Text(String),
    /// Premultiplied image for image elements.
    Image(Arc<Bitmap>),
}

impl Value {
    /// Text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Image value.
    pub fn image(bitmap: Bitmap) -> Self {
        Self::Image(Arc::new(bitmap))
    }
}

/// Supplies runtime values for variable elements.
pub trait ValueResolver {
    /// Value for `element` inside `collection`, or `None` when unbound.
    fn resolve(&self, collection: &LayoutCollection, element: &LayoutElement) -> Option<Value>;
}

impl<F> ValueResolver for F
where
    F: Fn(&LayoutCollection, &LayoutElement) -> Option<Value>,
{
    fn resolve(&self, collection: &LayoutCollection, element: &LayoutElement) -> Option<Value> {
        self(collection, element)
    }
}

/// Table-backed [`ValueResolver`].
///
/// Lookups try `(collection id, element id)` first, then `(collection id, category, name)`.
#[derive(Clone, Debug, Default)]
pub struct MapResolver {
    by_id: HashMap<(CollectionId, ElementId), Value>,
    by_name: HashMap<(CollectionId, Category, String), Value>,
}

impl MapResolver {
    /// Empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value to an element id.
    pub fn bind(&mut self, collection: CollectionId, element: ElementId, value: Value) {
        self.by_id.insert((collection, element), value);
    }

    /// Bind a value to every element of `category` named `name` in `collection`.
    pub fn bind_named(
        &mut self,
        collection: CollectionId,
        category: Category,
        name: impl Into<String>,
        value: Value,
    ) {
        self.by_name
            .insert((collection, category, name.into()), value);
    }

    /// Drop every binding.
    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_name.clear();
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.by_id.len() + self.by_name.len()
    }

    /// Return `true` when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load a values file. Image paths are read through `assets`.
    pub fn from_path(path: &Path, assets: &AssetStore) -> LayoutResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read values file '{}'", path.display()))?;
        let file: ValuesFile = serde_json::from_str(&text)
            .map_err(|e| LayoutError::serde(format!("values file '{}': {e}", path.display())))?;
        Self::from_file(file, assets)
    }

    /// Build from a parsed values file.
    pub fn from_file(file: ValuesFile, assets: &AssetStore) -> LayoutResult<Self> {
        let mut out = Self::new();
        for entry in file.values {
            let value = match (entry.text, entry.image) {
                (Some(text), None) => Value::Text(text),
                (None, Some(rel)) => Value::image(assets.load_image(&rel)?),
                _ => {
                    return Err(LayoutError::validation(format!(
                        "value for collection '{}' needs exactly one of `text` or `image`",
                        entry.collection
                    )));
                }
            };
            match (entry.element, entry.category, entry.name) {
                (Some(element), _, _) => out.bind(entry.collection, element, value),
                (None, Some(category), Some(name)) => {
                    out.bind_named(entry.collection, category, name, value)
                }
                _ => {
                    return Err(LayoutError::validation(format!(
                        "value for collection '{}' needs `element` or `category` + `name`",
                        entry.collection
                    )));
                }
            }
        }
        tracing::debug!(bindings = out.len(), "values loaded");
        Ok(out)
    }
}

impl ValueResolver for MapResolver {
    fn resolve(&self, collection: &LayoutCollection, element: &LayoutElement) -> Option<Value> {
        self.by_id
            .get(&(collection.id().clone(), element.id().clone()))
            .or_else(|| {
                self.by_name.get(&(
                    collection.id().clone(),
                    element.category(),
                    element.name().to_string(),
                ))
            })
            .cloned()
    }
}

/// On-disk values file.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ValuesFile {
    /// Bindings.
    #[serde(default)]
    pub values: Vec<ValueEntry>,
}

/// One binding in a [`ValuesFile`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ValueEntry {
    /// Owning collection id.
    pub collection: CollectionId,
    /// Element id; takes precedence over `category` + `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<ElementId>,
    /// Element category for name-based binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Element name for name-based binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Text value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Asset-relative image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
#[path = "../../tests/unit/compose/values.rs"]
mod tests;

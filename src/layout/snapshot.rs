use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::assets::decode::{decode_image, encode_png};
use crate::foundation::core::{Canvas, LayoutRect};
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::foundation::ids::{CollectionId, ElementId};
use crate::layout::element::{Category, ElementContent, ElementKind, LayoutElement};
use crate::raster::bitmap::Bitmap;
use crate::text::style::FontStyle;

/// Bitmap persisted as a base64-encoded PNG string.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedImage(pub Arc<Bitmap>);

impl serde::Serialize for EncodedImage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let png = encode_png(&self.0).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&STANDARD.encode(png))
    }
}

impl<'de> serde::Deserialize<'de> for EncodedImage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = STANDARD
            .decode(text.as_bytes())
            .map_err(serde::de::Error::custom)?;
        let bitmap = decode_image(&bytes).map_err(serde::de::Error::custom)?;
        Ok(Self(Arc::new(bitmap)))
    }
}

/// Persisted form of one element. Render caches are not stored.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ElementSnapshot {
    /// Display name.
    pub name: String,
    /// Category.
    pub category: Category,
    /// Identity.
    pub id: ElementId,
    /// Variant tag.
    pub kind: ElementKind,
    /// Text style.
    #[serde(default)]
    pub font: FontStyle,
    /// Width; must equal the position span.
    pub width: u32,
    /// Height; must equal the position span.
    pub height: u32,
    /// `[left, top, right, bottom]`.
    pub position: LayoutRect,
    /// Generation-time opacity.
    #[serde(default = "opaque")]
    pub alpha: u8,
    /// `ConstImage` source path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// `ConstImage` bitmap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EncodedImage>,
    /// `ConstText` text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `CounterImage` state map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<BTreeMap<String, EncodedImage>>,
}

fn opaque() -> u8 {
    u8::MAX
}

impl From<&LayoutElement> for ElementSnapshot {
    fn from(e: &LayoutElement) -> Self {
        let (mut source, mut image, mut text, mut states) = (None, None, None, None);
        match e.content() {
            ElementContent::ConstImage { source: s, image: i } => {
                source = Some(s.clone());
                image = Some(EncodedImage(Arc::clone(i)));
            }
            ElementContent::ConstText { text: t } => text = Some(t.clone()),
            ElementContent::CounterImage { states: m } => {
                states = Some(
                    m.iter()
                        .map(|(k, v)| (k.clone(), EncodedImage(Arc::clone(v))))
                        .collect(),
                );
            }
            ElementContent::VariableImage
            | ElementContent::VariableText
            | ElementContent::CounterText => {}
        }
        Self {
            name: e.name().to_string(),
            category: e.category(),
            id: e.id().clone(),
            kind: e.kind(),
            font: e.style().clone(),
            width: e.width(),
            height: e.height(),
            position: e.rect(),
            alpha: e.alpha(),
            source,
            image,
            text,
            states,
        }
    }
}

impl TryFrom<ElementSnapshot> for LayoutElement {
    type Error = LayoutError;

    fn try_from(s: ElementSnapshot) -> LayoutResult<Self> {
        if !s.position.has_size(s.width, s.height) {
            return Err(LayoutError::validation(format!(
                "element {}: size {}x{} does not match position {:?}",
                s.id,
                s.width,
                s.height,
                <[i32; 4]>::from(s.position)
            )));
        }
        let missing = |what: &str| {
            LayoutError::validation(format!("{} element {} has no {what}", s.kind, s.id))
        };
        let content = match s.kind {
            ElementKind::ConstImage => ElementContent::ConstImage {
                source: s.source.clone().unwrap_or_default(),
                image: s.image.clone().ok_or_else(|| missing("image"))?.0,
            },
            ElementKind::ConstText => ElementContent::ConstText {
                text: s.text.clone().unwrap_or_default(),
            },
            ElementKind::CounterImage => {
                let states = s
                    .states
                    .clone()
                    .filter(|m| !m.is_empty())
                    .ok_or_else(|| missing("states"))?;
                ElementContent::CounterImage {
                    states: states.into_iter().map(|(k, v)| (k, v.0)).collect(),
                }
            }
            ElementKind::VariableImage => ElementContent::VariableImage,
            ElementKind::VariableText => ElementContent::VariableText,
            ElementKind::CounterText => ElementContent::CounterText,
        };
        LayoutElement::from_parts(
            s.id,
            s.name,
            s.category,
            s.position,
            s.alpha,
            s.font,
            content,
        )
    }
}

/// Persisted form of one collection.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CollectionSnapshot {
    /// Identity.
    pub id: CollectionId,
    /// Display name.
    pub name: String,
    /// Mirror flag.
    #[serde(default)]
    pub mirror: bool,
    /// Placement `[left, top, right, bottom]`.
    pub position: LayoutRect,
    /// Display width; must equal the position span.
    pub width: u32,
    /// Display height; must equal the position span.
    pub height: u32,
    /// Elements, topmost first.
    pub elements: Vec<ElementSnapshot>,
}

/// A saved overlay layout.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct LayoutDocument {
    /// Design canvas.
    #[serde(default)]
    pub canvas: Canvas,
    /// Collections in board order.
    #[serde(default)]
    pub collections: Vec<CollectionSnapshot>,
}

impl LayoutDocument {
    /// Parse from JSON text.
    pub fn from_json_str(s: &str) -> LayoutResult<Self> {
        serde_json::from_str(s).map_err(|e| LayoutError::serde(format!("layout document: {e}")))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> LayoutResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::serde(format!("layout document: {e}")))
    }

    /// Read a document file.
    pub fn from_path(path: &Path) -> LayoutResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read layout '{}'", path.display()))?;
        let doc = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            collections = doc.collections.len(),
            "layout loaded"
        );
        Ok(doc)
    }

    /// Write a document file, creating parent directories.
    pub fn to_path(&self, path: &Path) -> LayoutResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create layout dir '{}'", parent.display()))?;
        }
        let text = self.to_json_string()?;
        std::fs::write(path, text).with_context(|| format!("write layout '{}'", path.display()))?;
        tracing::info!(
            path = %path.display(),
            collections = self.collections.len(),
            "layout saved"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/snapshot.rs"]
mod tests;

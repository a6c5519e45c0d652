use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::assets::color::HexColor;
use crate::assets::store::AssetStore;
use crate::compose::values::Value;
use crate::foundation::core::{Canvas, LayoutRect, ScaleFactor};
use crate::foundation::error::{LayoutError, LayoutResult, UnboundReason};
use crate::foundation::ids::ElementId;
use crate::foundation::math::Fnv1a64;
use crate::layout::placeholder::render_placeholder;
use crate::raster::bitmap::{self, Bitmap};
use crate::text::raster::TextRasterizer;
use crate::text::style::FontStyle;

/// Semantic group an element belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Static decoration.
    Const,
    /// Per-player data (name, character).
    Player,
    /// Per-team data (team name, badge).
    Team,
    /// Scores, stocks and other small states.
    Counter,
}

impl Category {
    /// Label drawn on placeholder boxes.
    pub fn label(self) -> &'static str {
        match self {
            Self::Const => "Const",
            Self::Player => "Player",
            Self::Team => "Team",
            Self::Counter => "Counter",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = LayoutError;

    fn from_str(s: &str) -> LayoutResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "const" => Ok(Self::Const),
            "player" => Ok(Self::Player),
            "team" => Ok(Self::Team),
            "counter" => Ok(Self::Counter),
            other => Err(LayoutError::validation(format!("unknown category \"{other}\""))),
        }
    }
}

/// Tag of the six element variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ElementKind {
    /// Fixed image asset.
    ConstImage,
    /// Image supplied at generation time.
    VariableImage,
    /// Fixed text.
    ConstText,
    /// Text supplied at generation time.
    VariableText,
    /// Counter rendered as text.
    CounterText,
    /// Counter rendered by picking one of a folder of state images.
    CounterImage,
}

impl ElementKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::ConstImage,
        Self::VariableImage,
        Self::ConstText,
        Self::VariableText,
        Self::CounterText,
        Self::CounterImage,
    ];

    /// Persistence tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConstImage => "ConstImage",
            Self::VariableImage => "VariableImage",
            Self::ConstText => "ConstText",
            Self::VariableText => "VariableText",
            Self::CounterText => "CounterText",
            Self::CounterImage => "CounterImage",
        }
    }

    /// Return `true` for kinds that need a runtime value.
    pub fn is_variable(self) -> bool {
        match self {
            Self::ConstImage | Self::ConstText => false,
            Self::VariableImage | Self::VariableText | Self::CounterText | Self::CounterImage => {
                true
            }
        }
    }

    /// Size given to freshly created elements. `ConstImage` uses its image size instead.
    pub fn default_size(self) -> (u32, u32) {
        match self {
            Self::ConstImage | Self::VariableImage => (200, 200),
            Self::ConstText | Self::VariableText => (300, 60),
            Self::CounterText | Self::CounterImage => (100, 100),
        }
    }

    /// Outline color of the placeholder box, for kinds that draw one.
    pub fn placeholder_color(self) -> Option<HexColor> {
        match self {
            Self::ConstImage | Self::ConstText => None,
            Self::VariableImage => Some(HexColor::rgb(0, 0, 255)),
            Self::VariableText => Some(HexColor::rgb(255, 0, 0)),
            Self::CounterText | Self::CounterImage => Some(HexColor::rgb(255, 255, 0)),
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ElementKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> LayoutResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| LayoutError::validation(format!("unknown element kind \"{s}\"")))
    }
}

/// Per-variant content payload.
#[derive(Clone, Debug)]
pub enum ElementContent {
    /// Image loaded once from `source`.
    ConstImage {
        /// Asset-relative path the image was loaded from.
        source: String,
        /// Decoded image at native size.
        image: Arc<Bitmap>,
    },
    /// Resolved at generation time.
    VariableImage,
    /// Stored text.
    ConstText {
        /// Text to render.
        text: String,
    },
    /// Resolved at generation time.
    VariableText,
    /// Resolved at generation time.
    CounterText,
    /// State key resolved at generation time, mapped through `states`.
    CounterImage {
        /// State key (file stem) to image.
        states: BTreeMap<String, Arc<Bitmap>>,
    },
}

impl ElementContent {
    /// Variant tag.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::ConstImage { .. } => ElementKind::ConstImage,
            Self::VariableImage => ElementKind::VariableImage,
            Self::ConstText { .. } => ElementKind::ConstText,
            Self::VariableText => ElementKind::VariableText,
            Self::CounterText => ElementKind::CounterText,
            Self::CounterImage { .. } => ElementKind::CounterImage,
        }
    }

    fn write_fingerprint(&self, h: &mut Fnv1a64) {
        h.write_str(self.kind().as_str());
        match self {
            Self::ConstImage { source, image } => {
                h.write_str(source);
                h.write_u32(image.width());
                h.write_u32(image.height());
            }
            Self::ConstText { text } => h.write_str(text),
            Self::CounterImage { states } => {
                for (key, img) in states {
                    h.write_str(key);
                    h.write_u32(img.width());
                    h.write_u32(img.height());
                }
            }
            Self::VariableImage | Self::VariableText | Self::CounterText => {}
        }
    }
}

/// Where a new element's content comes from.
#[derive(Clone, Debug, Default)]
pub enum ElementSource {
    /// Nothing to load.
    #[default]
    None,
    /// Asset-relative image path (`ConstImage`).
    Image(String),
    /// Asset-relative folder of state images (`CounterImage`).
    Folder(String),
    /// Literal text (`ConstText`).
    Text(String),
}

/// Creation parameters for [`LayoutElement::create`].
#[derive(Clone, Debug)]
pub struct ElementInit {
    /// Display name. For `ConstImage` an empty name becomes the image file name.
    pub name: String,
    /// Category.
    pub category: Category,
    /// Text style.
    pub style: FontStyle,
    /// Content source.
    pub source: ElementSource,
}

impl ElementInit {
    /// Init with default style and no source.
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            style: FontStyle::default(),
            source: ElementSource::None,
        }
    }

    /// Set the content source.
    pub fn with_source(mut self, source: ElementSource) -> Self {
        self.source = source;
        self
    }

    /// Set the text style.
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }
}

/// Atomic placeable unit of an overlay.
///
/// Geometry is an integer rectangle in design-canvas units; `width()`/`height()` are always the
/// rectangle's span and both are positive.
#[derive(Clone, Debug)]
pub struct LayoutElement {
    id: ElementId,
    name: String,
    category: Category,
    rect: LayoutRect,
    alpha: u8,
    style: FontStyle,
    content: ElementContent,
    display: Option<Arc<Bitmap>>,
}

impl LayoutElement {
    /// Build a new element of `kind`, loading any assets it needs up front.
    ///
    /// The element is centered on `canvas` at its image size (`ConstImage`) or the kind's
    /// default size.
    pub fn create(
        kind: ElementKind,
        init: ElementInit,
        assets: &AssetStore,
        canvas: Canvas,
    ) -> LayoutResult<Self> {
        let ElementInit {
            mut name,
            category,
            style,
            source,
        } = init;

        let content = match (kind, source) {
            (ElementKind::ConstImage, ElementSource::Image(rel)) => {
                let image = assets.load_image(&rel)?;
                if name.is_empty() {
                    name = Path::new(&rel)
                        .file_name()
                        .and_then(|s| s.to_str())
                        .unwrap_or(rel.as_str())
                        .to_string();
                }
                ElementContent::ConstImage {
                    source: rel,
                    image: Arc::new(image),
                }
            }
            (ElementKind::CounterImage, ElementSource::Folder(rel)) => {
                let states = assets
                    .load_image_folder(&rel)?
                    .into_iter()
                    .map(|(k, v)| (k, Arc::new(v)))
                    .collect();
                ElementContent::CounterImage { states }
            }
            (ElementKind::ConstText, ElementSource::Text(text)) => {
                ElementContent::ConstText { text }
            }
            (ElementKind::ConstText, ElementSource::None) => ElementContent::ConstText {
                text: name.clone(),
            },
            (ElementKind::VariableImage, ElementSource::None) => ElementContent::VariableImage,
            (ElementKind::VariableText, ElementSource::None) => ElementContent::VariableText,
            (ElementKind::CounterText, ElementSource::None) => ElementContent::CounterText,
            (kind, source) => {
                return Err(LayoutError::validation(format!(
                    "{kind} element cannot be created from {source:?}"
                )));
            }
        };

        let (w, h) = match &content {
            ElementContent::ConstImage { image, .. } => image.dimensions(),
            _ => kind.default_size(),
        };
        if w == 0 || h == 0 {
            return Err(LayoutError::asset(format!("{kind} asset has zero size")));
        }

        let element = Self {
            id: ElementId::generate(),
            name,
            category,
            rect: canvas.centered(w, h),
            alpha: u8::MAX,
            style,
            content,
            display: None,
        };
        tracing::debug!(id = %element.id, kind = %kind, "element created");
        Ok(element)
    }

    /// Reassemble an element from persisted parts.
    pub(crate) fn from_parts(
        id: ElementId,
        name: String,
        category: Category,
        rect: LayoutRect,
        alpha: u8,
        style: FontStyle,
        content: ElementContent,
    ) -> LayoutResult<Self> {
        check_rect(rect)?;
        Ok(Self {
            id,
            name,
            category,
            rect,
            alpha,
            style,
            content,
            display: None,
        })
    }

    /// Identity.
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename; invalidates the display cache (placeholders show the name).
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.display = None;
    }

    /// Category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Variant tag.
    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }

    /// Content payload.
    pub fn content(&self) -> &ElementContent {
        &self.content
    }

    /// Position rectangle in design units.
    pub fn rect(&self) -> LayoutRect {
        self.rect
    }

    /// Width in design units.
    pub fn width(&self) -> u32 {
        self.rect.width() as u32
    }

    /// Height in design units.
    pub fn height(&self) -> u32 {
        self.rect.height() as u32
    }

    /// Opacity applied at generation time.
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Set the generation-time opacity.
    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    /// Text style.
    pub fn style(&self) -> &FontStyle {
        &self.style
    }

    /// Replace the text style; invalidates the display cache.
    pub fn set_style(&mut self, style: FontStyle) {
        self.style = style;
        self.display = None;
    }

    /// Return `true` when generation needs a runtime value for this element.
    pub fn is_variable(&self) -> bool {
        self.kind().is_variable()
    }

    /// Resize keeping the top-left corner. Minimum sizes are the caller's concern.
    pub fn resize(&mut self, width: u32, height: u32) -> LayoutResult<()> {
        self.set_rect(self.rect.with_size(width, height))
    }

    /// Replace the rectangle.
    pub fn set_rect(&mut self, rect: LayoutRect) -> LayoutResult<()> {
        check_rect(rect)?;
        if rect.width() != self.rect.width() || rect.height() != self.rect.height() {
            self.display = None;
        }
        self.rect = rect;
        Ok(())
    }

    /// Move without changing size.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.rect = self.rect.translated(dx, dy);
    }

    /// Drop the display cache; it is rebuilt on the next [`Self::display_bitmap`].
    pub fn invalidate_display(&mut self) {
        self.display = None;
    }

    /// Check that `value` can drive this element.
    pub fn check_value(&self, value: Option<&Value>) -> Result<(), UnboundReason> {
        if !self.is_variable() {
            return Ok(());
        }
        let value = value.ok_or(UnboundReason::Missing)?;
        match (&self.content, value) {
            (ElementContent::VariableText | ElementContent::CounterText, Value::Text(s)) => {
                if s.is_empty() {
                    Err(UnboundReason::Empty)
                } else {
                    Ok(())
                }
            }
            (
                ElementContent::VariableImage | ElementContent::CounterImage { .. },
                Value::Image(img),
            ) => {
                if img.width() == 0 || img.height() == 0 {
                    Err(UnboundReason::Empty)
                } else {
                    Ok(())
                }
            }
            (ElementContent::CounterImage { states }, Value::Text(key)) => {
                if key.is_empty() {
                    Err(UnboundReason::Empty)
                } else if states.contains_key(key) {
                    Ok(())
                } else {
                    Err(UnboundReason::UnknownState(key.clone()))
                }
            }
            _ => Err(UnboundReason::KindMismatch),
        }
    }

    /// Render at output size `(width x scale, height x scale)`.
    ///
    /// Const variants ignore `value`. Image content is resized then flipped when `mirror`;
    /// text content uses the mirrored style.
    pub fn render_image(
        &self,
        value: Option<&Value>,
        mirror: bool,
        scale: ScaleFactor,
        rasterizer: &TextRasterizer,
    ) -> LayoutResult<Bitmap> {
        let target = (scale.apply_u32(self.width()), scale.apply_u32(self.height()));
        self.check_value(value).map_err(|reason| {
            LayoutError::validation(format!("element {} ({}): {reason}", self.id, self.name))
        })?;

        match (&self.content, value) {
            (ElementContent::ConstImage { image, .. }, _) => Ok(fit_image(image, target, mirror)),
            (ElementContent::ConstText { text }, _) => {
                self.render_text(text, mirror, target, rasterizer)
            }
            (ElementContent::VariableText | ElementContent::CounterText, Some(Value::Text(s))) => {
                self.render_text(s, mirror, target, rasterizer)
            }
            (ElementContent::CounterImage { states }, Some(Value::Text(key))) => {
                let image = states.get(key).ok_or_else(|| {
                    LayoutError::validation(format!("unknown counter state \"{key}\""))
                })?;
                Ok(fit_image(image, target, mirror))
            }
            (_, Some(Value::Image(image))) => Ok(fit_image(image, target, mirror)),
            _ => Err(LayoutError::validation(format!(
                "element {} ({}) has no usable value",
                self.id, self.name
            ))),
        }
    }

    /// Editor-size bitmap: content for const variants, a labeled placeholder otherwise.
    ///
    /// Cached until the element is resized or restyled.
    pub fn display_bitmap(&mut self, rasterizer: &TextRasterizer) -> LayoutResult<Arc<Bitmap>> {
        if let Some(cached) = &self.display {
            return Ok(Arc::clone(cached));
        }
        let size = (self.width(), self.height());
        let bitmap = match &self.content {
            ElementContent::ConstImage { image, .. } => fit_image(image, size, false),
            ElementContent::ConstText { text } => {
                rasterizer.render_text(text, &self.style, Some(size))?
            }
            _ => render_placeholder(self.kind(), self.category, &self.name, size, rasterizer)?,
        };
        let bitmap = Arc::new(bitmap);
        self.display = Some(Arc::clone(&bitmap));
        Ok(bitmap)
    }

    /// Editor-size bitmap as it appears inside a collection with the given mirror state.
    pub fn preview_bitmap(
        &mut self,
        mirror: bool,
        rasterizer: &TextRasterizer,
    ) -> LayoutResult<Arc<Bitmap>> {
        if !mirror {
            return self.display_bitmap(rasterizer);
        }
        match &self.content {
            ElementContent::ConstImage { image, .. } => Ok(Arc::new(fit_image(
                image,
                (self.width(), self.height()),
                true,
            ))),
            ElementContent::ConstText { text } => Ok(Arc::new(self.render_text(
                text,
                true,
                (self.width(), self.height()),
                rasterizer,
            )?)),
            _ => self.display_bitmap(rasterizer),
        }
    }

    /// Hash of everything that affects [`Self::render_image`] except the bound value.
    pub(crate) fn render_fingerprint(&self, h: &mut Fnv1a64) {
        h.write_str(self.id.as_str());
        h.write_u32(self.width());
        h.write_u32(self.height());
        h.write_str(self.style.face());
        h.write_str(&self.style.fill().to_hex());
        h.write_str(&self.style.stroke().to_hex());
        h.write_u32(self.style.stroke_width());
        h.write_u8(self.style.anchor() as u8);
        self.content.write_fingerprint(h);
    }

    fn render_text(
        &self,
        text: &str,
        mirror: bool,
        target: (u32, u32),
        rasterizer: &TextRasterizer,
    ) -> LayoutResult<Bitmap> {
        if mirror {
            rasterizer.render_text(text, &self.style.mirror(), Some(target))
        } else {
            rasterizer.render_text(text, &self.style, Some(target))
        }
    }
}

fn fit_image(image: &Bitmap, (w, h): (u32, u32), mirror: bool) -> Bitmap {
    let resized = bitmap::resize(image, w, h);
    if mirror {
        bitmap::flip_horizontal(&resized)
    } else {
        resized
    }
}

fn check_rect(rect: LayoutRect) -> LayoutResult<()> {
    if !rect.checked_size().is_some_and(|(w, h)| w > 0 && h > 0) {
        return Err(LayoutError::validation(format!(
            "element rectangle must have positive size, got {:?}",
            <[i32; 4]>::from(rect)
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/element.rs"]
mod tests;

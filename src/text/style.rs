use crate::assets::color::HexColor;
use crate::foundation::error::{LayoutError, LayoutResult};

/// Horizontal placement of rendered text inside its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
}

impl Anchor {
    /// Left and right swap; center is a fixed point.
    pub fn mirror(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Center => Self::Center,
            Self::Right => Self::Left,
        }
    }

    /// X offset of a `content`-wide run inside a `target`-wide box.
    pub fn offset(self, target: u32, content: u32) -> i64 {
        let slack = i64::from(target) - i64::from(content);
        match self {
            Self::Left => 0,
            Self::Center => slack / 2,
            Self::Right => slack,
        }
    }
}

/// Immutable text style.
///
/// Builders consume `self` and return a new value; there are no setters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontStyle {
    face: String,
    fill: HexColor,
    stroke: HexColor,
    stroke_width: u32,
    anchor: Anchor,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            face: "sans-serif".to_string(),
            fill: HexColor::BLACK,
            stroke: HexColor::BLACK,
            stroke_width: 0,
            anchor: Anchor::Center,
        }
    }
}

impl FontStyle {
    /// Face reference: a family name or a font file name from the fonts directory.
    pub fn with_face(self, face: impl Into<String>) -> Self {
        Self {
            face: face.into(),
            ..self
        }
    }

    /// Fill color.
    pub fn with_fill(self, fill: HexColor) -> Self {
        Self { fill, ..self }
    }

    /// Stroke color.
    pub fn with_stroke(self, stroke: HexColor) -> Self {
        Self { stroke, ..self }
    }

    /// Stroke width in reference-size pixels.
    pub fn with_stroke_width(self, stroke_width: u32) -> Self {
        Self {
            stroke_width,
            ..self
        }
    }

    /// Horizontal anchor.
    pub fn with_anchor(self, anchor: Anchor) -> Self {
        Self { anchor, ..self }
    }

    /// Style from string fields as they come from an editing form.
    pub fn from_parts(
        face: &str,
        fill: &str,
        stroke: &str,
        stroke_width: i64,
        anchor: Anchor,
    ) -> LayoutResult<Self> {
        let stroke_width = u32::try_from(stroke_width)
            .map_err(|_| LayoutError::validation("stroke width must be >= 0"))?;
        Ok(Self::default()
            .with_face(face)
            .with_fill(fill.parse()?)
            .with_stroke(stroke.parse()?)
            .with_stroke_width(stroke_width)
            .with_anchor(anchor))
    }

    /// Face reference.
    pub fn face(&self) -> &str {
        &self.face
    }

    /// Fill color.
    pub fn fill(&self) -> HexColor {
        self.fill
    }

    /// Stroke color.
    pub fn stroke(&self) -> HexColor {
        self.stroke
    }

    /// Stroke width.
    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    /// Horizontal anchor.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Copy with the anchor swapped left/right.
    pub fn mirror(&self) -> Self {
        Self {
            anchor: self.anchor.mirror(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/style.rs"]
mod tests;

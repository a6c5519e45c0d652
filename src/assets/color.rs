use crate::foundation::error::{LayoutError, LayoutResult};

/// Opaque sRGB color written as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl HexColor {
    /// Pure black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, digits are case-insensitive).
    pub fn parse(s: &str) -> LayoutResult<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LayoutError::validation(format!(
                "color must be #RRGGBB, got \"{s}\""
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| LayoutError::validation(format!("invalid hex color \"{s}\": {e}")))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#RRGGBB`, upper case.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Per-channel 255-complement.
    pub fn complement(self) -> Self {
        Self::rgb(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Straight RGBA8 with the given alpha.
    pub fn with_alpha(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for HexColor {
    type Err = LayoutError;

    fn from_str(s: &str) -> LayoutResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = LayoutError;

    fn try_from(s: String) -> LayoutResult<Self> {
        Self::parse(&s)
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> String {
        c.to_hex()
    }
}

/// Contrasting color for `hex` (`#RRGGBB`), e.g. for a text stroke.
///
/// `complement_hex("#FF0000") == "#00FFFF"`; applying it twice returns the input (upper-cased).
pub fn complement_hex(hex: &str) -> LayoutResult<String> {
    Ok(HexColor::parse(hex)?.complement().to_hex())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;

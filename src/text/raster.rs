use std::path::PathBuf;

use crate::assets::decode::parse_svg;
use crate::assets::fonts::FontBook;
use crate::foundation::error::LayoutResult;
use crate::raster::bitmap::{self, Bitmap};
use crate::raster::composite::paste_over;
use crate::raster::svg::{rasterize_svg, rasterize_svg_offset, svg_raster_size};
use crate::text::style::FontStyle;

/// Options for [`TextRasterizer`].
#[derive(Clone, Debug)]
pub struct TextRasterizerOpts {
    /// Font size glyphs are rendered at before fitting, in pixels.
    pub reference_px: f32,
    /// Load the host's system fonts.
    pub load_system_fonts: bool,
    /// Directory of font files addressable by file name.
    pub fonts_dir: Option<PathBuf>,
}

impl Default for TextRasterizerOpts {
    fn default() -> Self {
        Self {
            reference_px: 100.0,
            load_system_fonts: false,
            fonts_dir: None,
        }
    }
}

/// Renders single-line text and SVG snippets into premultiplied bitmaps.
#[derive(Clone, Debug)]
pub struct TextRasterizer {
    opts: TextRasterizerOpts,
    fonts: FontBook,
}

impl TextRasterizer {
    /// Load fonts according to `opts`.
    pub fn new(opts: TextRasterizerOpts) -> LayoutResult<Self> {
        let fonts = FontBook::load(opts.load_system_fonts, opts.fonts_dir.as_deref())?;
        Ok(Self { opts, fonts })
    }

    /// Rasterizer over an already loaded font book.
    pub fn with_fonts(opts: TextRasterizerOpts, fonts: FontBook) -> Self {
        Self { opts, fonts }
    }

    /// Active options.
    pub fn opts(&self) -> &TextRasterizerOpts {
        &self.opts
    }

    /// Font book in use.
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Render `text` with `style`.
    ///
    /// Glyphs are rendered at the reference size into a bitmap cropped to their opaque bounds.
    /// With a `target`, that bitmap is shrunk (never enlarged) to fit, then placed on a
    /// transparent `target`-sized canvas: horizontally by the style's anchor, flush top.
    /// Empty text, or text no loaded face can draw, yields a transparent result.
    ///
    /// Text is single-line: only the first line is drawn, everything after the first line
    /// break is ignored.
    pub fn render_text(
        &self,
        text: &str,
        style: &FontStyle,
        target: Option<(u32, u32)>,
    ) -> LayoutResult<Bitmap> {
        let glyphs = self.render_glyphs(text, style)?;
        let Some((tw, th)) = target else {
            return Ok(glyphs.unwrap_or_else(|| bitmap::transparent(1, 1)));
        };

        let mut canvas = bitmap::transparent(tw.max(1), th.max(1));
        let Some(glyphs) = glyphs else {
            return Ok(canvas);
        };

        let (gw, gh) = bitmap::fit_within(glyphs.width(), glyphs.height(), tw, th);
        let fitted = bitmap::resize(&glyphs, gw, gh);
        let x = style.anchor().offset(tw, gw);
        paste_over(&mut canvas, &fitted, x, 0);
        Ok(canvas)
    }

    /// Parse and rasterize an SVG document stretched to `(width, height)`, or at its natural
    /// size when `None`.
    pub fn render_svg(&self, svg: &str, size: Option<(u32, u32)>) -> LayoutResult<Bitmap> {
        let tree = parse_svg(svg, &self.fonts)?;
        let (w, h) = match size {
            Some(s) => s,
            None => svg_raster_size(&tree)?,
        };
        rasterize_svg(&tree, w.max(1), h.max(1))
    }

    fn render_glyphs(&self, text: &str, style: &FontStyle) -> LayoutResult<Option<Bitmap>> {
        let line = first_line(text);
        if line.is_empty() {
            return Ok(None);
        }

        let px = self.opts.reference_px.max(1.0);
        let stroke = style.stroke_width() as f32;
        // Generous canvas; glyph bounds are measured after parsing.
        let est_w = (line.chars().count() as f32 * px * 1.5 + stroke * 2.0).ceil();
        let est_h = (px * 2.0 + stroke * 2.0).ceil();

        let svg = text_svg(line, style, self.fonts.family_for(style.face()), px, est_w, est_h);
        let tree = parse_svg(&svg, &self.fonts)?;
        if !tree.root().has_children() {
            tracing::debug!(face = style.face(), "no face could render text");
            return Ok(None);
        }

        let bbox = tree.root().abs_stroke_bounding_box();
        if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
            return Ok(None);
        }
        let w = (bbox.width().ceil() as u32).saturating_add(2);
        let h = (bbox.height().ceil() as u32).saturating_add(2);
        let rendered = rasterize_svg_offset(&tree, w, h, 1.0 - bbox.x(), 1.0 - bbox.y())?;
        if bitmap::opaque_bounds(&rendered).is_none() {
            return Ok(None);
        }
        Ok(Some(bitmap::crop_to_opaque(rendered)))
    }
}

/// The drawn part of `text`: its first line without trailing whitespace.
pub(crate) fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim_end()
}

fn text_svg(line: &str, style: &FontStyle, family: &str, px: f32, w: f32, h: f32) -> String {
    let stroke = if style.stroke_width() > 0 {
        // Strokes straddle the outline: paint under the fill at twice the width.
        format!(
            r#" stroke="{}" stroke-width="{}" stroke-linejoin="round" paint-order="stroke""#,
            style.stroke(),
            style.stroke_width() * 2
        )
    } else {
        String::new()
    };
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"><text x="{x}" y="{px}" font-family="{family}" font-size="{px}" fill="{fill}"{stroke}>{text}</text></svg>"#,
        x = style.stroke_width(),
        family = escape_xml(family),
        fill = style.fill(),
        text = escape_xml(line),
    )
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/raster.rs"]
mod tests;

use crate::foundation::error::{LayoutError, LayoutResult};
use crate::layout::element::{Category, ElementKind};
use crate::raster::bitmap::Bitmap;
use crate::text::raster::{TextRasterizer, escape_xml};

const LABEL_PX: u32 = 20;
const OUTLINE: u32 = 5;
const FILL_ALPHA: u8 = 100;

/// Labeled box standing in for a variable element in the editor.
///
/// Drawn at the kind's default size and stretched to `size`: a translucent white fill, a
/// colored outline, the category in the top-left corner and the element name centered.
pub fn render_placeholder(
    kind: ElementKind,
    category: Category,
    name: &str,
    size: (u32, u32),
    rasterizer: &TextRasterizer,
) -> LayoutResult<Bitmap> {
    let color = kind.placeholder_color().ok_or_else(|| {
        LayoutError::validation(format!("{kind} elements have no placeholder"))
    })?;
    let (w, h) = kind.default_size();
    let family = escape_xml(rasterizer.fonts().family_for("sans-serif"));
    let inset = OUTLINE as f32 / 2.0;

    let svg = format!(
        concat!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"##,
            r##"<rect width="{w}" height="{h}" fill="#FFFFFF" fill-opacity="{fill_opacity}"/>"##,
            r##"<rect x="{inset}" y="{inset}" width="{iw}" height="{ih}" fill="none" stroke="{color}" stroke-width="{outline}"/>"##,
            r##"<g font-family="{family}" font-size="{label_px}" fill="#FFFFFF" stroke="#000000" stroke-width="4" stroke-linejoin="round" paint-order="stroke">"##,
            r##"<text x="2" y="{label_px}">{category}</text>"##,
            r##"<text x="{cx}" y="{cy}" text-anchor="middle" dominant-baseline="central">{name}</text>"##,
            r##"</g></svg>"##,
        ),
        w = w,
        h = h,
        fill_opacity = f32::from(FILL_ALPHA) / 255.0,
        inset = inset,
        iw = w as f32 - OUTLINE as f32,
        ih = h as f32 - OUTLINE as f32,
        color = color,
        outline = OUTLINE,
        family = family,
        label_px = LABEL_PX,
        category = category.label(),
        cx = w / 2,
        cy = h / 2,
        name = escape_xml(name),
    );

    rasterizer.render_svg(&svg, Some((size.0.max(1), size.1.max(1))))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placeholder.rs"]
mod tests;

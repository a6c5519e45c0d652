use super::*;
use crate::assets::color::HexColor;
use crate::text::style::Anchor;

fn rasterizer() -> TextRasterizer {
    TextRasterizer::with_fonts(TextRasterizerOpts::default(), FontBook::empty())
}

#[test]
fn default_reference_size_is_100px() {
    let opts = TextRasterizerOpts::default();
    assert_eq!(opts.reference_px, 100.0);
    assert!(!opts.load_system_fonts);
}

#[test]
fn empty_text_yields_transparent_target() {
    let r = rasterizer();
    let b = r
        .render_text("", &FontStyle::default(), Some((300, 60)))
        .unwrap();
    assert_eq!(b.dimensions(), (300, 60));
    assert!(b.pixels().all(|p| p.0[3] == 0));
}

#[test]
fn text_without_faces_yields_transparent_target() {
    let r = rasterizer();
    let style = FontStyle::default()
        .with_fill(HexColor::WHITE)
        .with_stroke_width(3)
        .with_anchor(Anchor::Right);
    let b = r.render_text("PLAYER1", &style, Some((120, 40))).unwrap();
    assert_eq!(b.dimensions(), (120, 40));
    assert!(b.pixels().all(|p| p.0[3] == 0));
}

#[test]
fn untargeted_empty_text_is_one_pixel() {
    let r = rasterizer();
    let b = r.render_text("   ", &FontStyle::default(), None).unwrap();
    assert_eq!(b.dimensions(), (1, 1));
}

#[test]
fn render_svg_natural_and_stretched() {
    let r = rasterizer();
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="5"><rect width="10" height="5" fill="#00FF00"/></svg>"##;

    let natural = r.render_svg(svg, None).unwrap();
    assert_eq!(natural.dimensions(), (10, 5));
    assert_eq!(natural.get_pixel(5, 2).0, [0, 255, 0, 255]);

    let stretched = r.render_svg(svg, Some((20, 20))).unwrap();
    assert_eq!(stretched.dimensions(), (20, 20));
}

#[test]
fn escape_xml_covers_markup_characters() {
    assert_eq!(
        escape_xml(r#"<Tom & "Jerry's">"#),
        "&lt;Tom &amp; &quot;Jerry&apos;s&quot;&gt;"
    );
}

#[test]
fn text_svg_doubles_stroke_and_uses_family() {
    let style = FontStyle::default()
        .with_stroke(HexColor::WHITE)
        .with_stroke_width(4);
    let svg = text_svg("A&B", &style, "Noto Sans", 100.0, 400.0, 200.0);
    assert!(svg.contains(r#"stroke-width="8""#));
    assert!(svg.contains(r##"stroke="#FFFFFF""##));
    assert!(svg.contains(r#"font-family="Noto Sans""#));
    assert!(svg.contains("A&amp;B"));
    assert!(svg.contains(r#"paint-order="stroke""#));

    let plain = text_svg("x", &FontStyle::default(), "serif", 100.0, 150.0, 200.0);
    assert!(!plain.contains("stroke="));
}

#[test]
fn only_the_first_line_is_drawn() {
    assert_eq!(first_line("PLAYER1\nPLAYER2"), "PLAYER1");
    assert_eq!(first_line("A  \r\nB"), "A");
    assert_eq!(first_line("\nB"), "");

    let r = rasterizer();
    let b = r
        .render_text("\nhidden", &FontStyle::default(), Some((50, 20)))
        .unwrap();
    assert_eq!(b.dimensions(), (50, 20));
    assert!(b.pixels().all(|p| p.0[3] == 0));
}

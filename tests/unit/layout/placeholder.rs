use super::*;
use crate::assets::fonts::FontBook;
use crate::text::raster::TextRasterizerOpts;

fn rasterizer() -> TextRasterizer {
    TextRasterizer::with_fonts(TextRasterizerOpts::default(), FontBook::empty())
}

#[test]
fn placeholder_has_translucent_fill_and_colored_outline() {
    let b = render_placeholder(
        ElementKind::VariableText,
        Category::Player,
        "name",
        (300, 60),
        &rasterizer(),
    )
    .unwrap();
    assert_eq!(b.dimensions(), (300, 60));

    let outline = b.get_pixel(1, 30).0;
    assert_eq!(outline, [255, 0, 0, 255]);

    let inside = b.get_pixel(150, 50).0;
    assert!(inside[3] > 90 && inside[3] < 110, "fill alpha {}", inside[3]);
    assert_eq!(inside[0], inside[3]);
}

#[test]
fn placeholder_stretches_to_requested_size() {
    let b = render_placeholder(
        ElementKind::CounterImage,
        Category::Counter,
        "stocks",
        (40, 250),
        &rasterizer(),
    )
    .unwrap();
    assert_eq!(b.dimensions(), (40, 250));
    let edge = b.get_pixel(0, 125).0;
    assert_eq!(&edge[..2], &[255, 255]);
    assert_eq!(edge[2], 0);
}

#[test]
fn const_kinds_have_no_placeholder() {
    assert!(
        render_placeholder(
            ElementKind::ConstImage,
            Category::Const,
            "logo",
            (10, 10),
            &rasterizer()
        )
        .is_err()
    );
}

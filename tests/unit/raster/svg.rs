use super::*;

fn parse(svg: &str) -> usvg::Tree {
    usvg::Tree::from_str(svg, &usvg::Options::default()).unwrap()
}

#[test]
fn rasterize_svg_fills_rect_premultiplied() {
    let tree = parse(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
            <rect width="4" height="4" fill="#FF0000" fill-opacity="0.5"/>
        </svg>"##,
    );
    assert_eq!(svg_raster_size(&tree).unwrap(), (4, 4));

    let b = rasterize_svg(&tree, 8, 8).unwrap();
    assert_eq!(b.dimensions(), (8, 8));
    let px = b.get_pixel(4, 4).0;
    assert!(px[3] > 120 && px[3] < 135);
    assert_eq!(px[0], px[3]);
    assert_eq!(px[1], 0);
}

#[test]
fn rasterize_svg_offset_translates_content() {
    let tree = parse(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2">
            <rect x="0" y="0" width="2" height="2" fill="#FFFFFF"/>
        </svg>"##,
    );
    let b = rasterize_svg_offset(&tree, 6, 6, 3.0, 3.0).unwrap();
    assert_eq!(b.get_pixel(1, 1).0[3], 0);
    assert_eq!(b.get_pixel(4, 4).0[3], 255);
}

#[test]
fn rasterize_rejects_huge_targets() {
    let tree = parse(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    assert!(rasterize_svg(&tree, 20_000, 1).is_err());
}

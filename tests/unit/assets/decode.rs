use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, vec![100, 50, 200, 128]);

    let bitmap = decode_image(&buf).unwrap();
    assert_eq!(bitmap.dimensions(), (1, 1));
    assert_eq!(
        bitmap.as_raw().as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_rejects_garbage() {
    let err = decode_image(b"definitely not a png").unwrap_err();
    assert!(err.to_string().starts_with("asset error:"));
}

#[test]
fn encode_png_keeps_opaque_pixels_exact() {
    let src = vec![10, 20, 30, 255, 200, 100, 0, 255];
    let bitmap = decode_image(&png_bytes(2, 1, src.clone())).unwrap();

    let encoded = encode_png(&bitmap).unwrap();
    let back = decode_image(&encoded).unwrap();
    assert_eq!(back.as_raw(), &src);
}

#[test]
fn parse_svg_ok_and_err() {
    let fonts = FontBook::empty();
    let ok = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
    parse_svg(ok, &fonts).unwrap();

    assert!(parse_svg("<svg", &fonts).is_err());
}

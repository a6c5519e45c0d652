use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> Bitmap {
    Bitmap::from_pixel(w, h, image::Rgba(px))
}

#[test]
fn fit_within_never_enlarges() {
    assert_eq!(fit_within(50, 20, 300, 60), (50, 20));
    assert_eq!(fit_within(300, 60, 300, 60), (300, 60));
}

#[test]
fn fit_within_preserves_aspect_when_shrinking() {
    assert_eq!(fit_within(600, 100, 300, 60), (300, 50));
    assert_eq!(fit_within(100, 200, 300, 60), (30, 60));
}

#[test]
fn multiply_alpha_scales_all_channels() {
    let mut b = solid(1, 1, [200, 100, 0, 255]);
    multiply_alpha(&mut b, 128);
    assert_eq!(b.get_pixel(0, 0).0, [100, 50, 0, 128]);

    let mut full = solid(1, 1, [1, 2, 3, 4]);
    multiply_alpha(&mut full, 255);
    assert_eq!(full.get_pixel(0, 0).0, [1, 2, 3, 4]);
}

#[test]
fn crop_to_opaque_tightens_to_painted_pixels() {
    let mut b = Bitmap::new(10, 8);
    b.put_pixel(2, 3, image::Rgba([255, 0, 0, 255]));
    b.put_pixel(5, 6, image::Rgba([0, 255, 0, 255]));

    assert_eq!(opaque_bounds(&b), Some((2, 3, 6, 7)));
    let cropped = crop_to_opaque(b);
    assert_eq!(cropped.dimensions(), (4, 4));
    assert_eq!(cropped.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(cropped.get_pixel(3, 3).0, [0, 255, 0, 255]);
}

#[test]
fn crop_to_opaque_keeps_fully_transparent_bitmap() {
    let b = Bitmap::new(7, 5);
    assert_eq!(opaque_bounds(&b), None);
    assert_eq!(crop_to_opaque(b).dimensions(), (7, 5));
}

#[test]
fn flip_horizontal_mirrors_columns() {
    let mut b = Bitmap::new(3, 1);
    b.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
    let f = flip_horizontal(&b);
    assert_eq!(f.get_pixel(2, 0).0, [255, 0, 0, 255]);
    assert_eq!(f.get_pixel(0, 0).0, [0, 0, 0, 0]);
}

#[test]
fn resize_hits_exact_target() {
    let b = solid(4, 2, [10, 10, 10, 255]);
    assert_eq!(resize(&b, 8, 8).dimensions(), (8, 8));
    assert_eq!(resize(&b, 0, 3).dimensions(), (1, 3));
}

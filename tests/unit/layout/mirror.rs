use super::*;

#[test]
fn identity_when_not_mirrored() {
    let rects = [LayoutRect::new(10, 0, 50, 20), LayoutRect::new(60, 0, 100, 20)];
    let t = MirrorTransform::for_elements(rects, false);
    assert_eq!(t.span(), 100);
    assert_eq!(t.element_x(rects[0]), 10);
    assert_eq!(t.element_x(rects[1]), 60);
}

#[test]
fn mirrored_positions_reflect_about_span() {
    let rects = [LayoutRect::new(10, 0, 50, 20), LayoutRect::new(60, 0, 100, 20)];
    let t = MirrorTransform::for_elements(rects, true);
    assert_eq!(t.element_x(rects[0]), 50);
    assert_eq!(t.element_x(rects[1]), 0);
    assert_eq!(t.element_x_scaled(rects[0], ScaleFactor::X2), 100);
}

#[test]
fn empty_set_has_zero_span() {
    let t = MirrorTransform::for_elements(std::iter::empty(), true);
    assert_eq!(t.span(), 0);
}

#[test]
fn mirrored_placement_matches_reference_values() {
    assert_eq!(placement_x(960, 100, 200, ScaleFactor::X1, true), 660);
    assert_eq!(placement_x(960, 100, 200, ScaleFactor::X1, false), 100);
    assert_eq!(placement_x(1920, 100, 200, ScaleFactor::X2, true), 1320);
}

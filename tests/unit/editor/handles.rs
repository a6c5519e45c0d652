use super::*;

#[test]
fn anchors_sit_on_corners_and_midpoints() {
    let r = LayoutRect::new(10, 20, 110, 60);
    assert_eq!(Handle::TopLeft.anchor(r), Point::new(10.0, 20.0));
    assert_eq!(Handle::Top.anchor(r), Point::new(60.0, 20.0));
    assert_eq!(Handle::Right.anchor(r), Point::new(110.0, 40.0));
    assert_eq!(Handle::BottomLeft.anchor(r), Point::new(10.0, 60.0));
}

#[test]
fn hit_rect_is_centered_square() {
    let r = LayoutRect::new(10, 20, 110, 60);
    let hit = Handle::BottomRight.hit_rect(r, 3.0);
    assert_eq!(hit, Rect::new(107.0, 57.0, 113.0, 63.0));
}

#[test]
fn apply_moves_only_controlled_edges() {
    let r = LayoutRect::new(10, 20, 110, 60);
    let p = Point::new(50.4, 30.6);
    assert_eq!(Handle::Top.apply(r, p), LayoutRect::new(10, 31, 110, 60));
    assert_eq!(Handle::Left.apply(r, p), LayoutRect::new(50, 20, 110, 60));
    assert_eq!(Handle::TopRight.apply(r, p), LayoutRect::new(10, 31, 50, 60));
    assert_eq!(
        Handle::BottomLeft.apply(r, Point::new(0.0, 100.0)),
        LayoutRect::new(0, 20, 110, 100)
    );
}

#[test]
fn all_lists_eight_distinct_handles() {
    let mut seen = std::collections::HashSet::new();
    for h in Handle::ALL {
        assert!(seen.insert(h));
    }
    assert_eq!(seen.len(), 8);
}

use super::*;
use crate::assets::fonts::FontBook;
use crate::assets::store::AssetStore;
use crate::layout::element::{Category, ElementInit, ElementKind};
use crate::text::raster::TextRasterizerOpts;

fn rasterizer() -> TextRasterizer {
    TextRasterizer::with_fonts(TextRasterizerOpts::default(), FontBook::empty())
}

fn element(kind: ElementKind, name: &str) -> LayoutElement {
    LayoutElement::create(
        kind,
        ElementInit::new(name, Category::Player),
        &AssetStore::new(std::env::temp_dir()),
        Canvas::default(),
    )
    .unwrap()
}

fn ids(c: &LayoutCollection) -> Vec<ElementId> {
    c.elements().iter().map(|e| e.id().clone()).collect()
}

#[test]
fn new_collection_is_centered_at_preview_size() {
    let r = rasterizer();
    let c = LayoutCollection::new(
        "p1",
        vec![element(ElementKind::VariableText, "name")],
        Canvas::default(),
        &r,
    )
    .unwrap();
    assert_eq!(c.rect(), LayoutRect::new(330, 240, 630, 300));
    assert_eq!(c.preview().unwrap().dimensions(), (300, 60));
    assert!(!c.mirror());
}

#[test]
fn empty_collection_is_rejected() {
    assert!(LayoutCollection::new("x", Vec::new(), Canvas::default(), &rasterizer()).is_err());
}

#[test]
fn add_inserts_on_top_and_marks_preview_stale() {
    let r = rasterizer();
    let mut c = LayoutCollection::new(
        "p1",
        vec![element(ElementKind::VariableText, "name")],
        Canvas::default(),
        &r,
    )
    .unwrap();
    let top = element(ElementKind::CounterText, "score");
    let top_id = top.id().clone();
    c.add_element(top).unwrap();

    assert_eq!(c.elements()[0].id(), &top_id);
    assert!(c.preview().is_none());
    c.build_preview(&r).unwrap();
    assert!(c.preview().is_some());

    let removed = c.remove_element(&top_id).unwrap();
    assert_eq!(removed.id(), &top_id);
    assert!(c.preview().is_none());
    assert!(c.remove_element(&top_id).is_none());
}

#[test]
fn reorder_is_noop_at_boundaries() {
    let r = rasterizer();
    let mut c = LayoutCollection::new(
        "p1",
        vec![
            element(ElementKind::VariableText, "a"),
            element(ElementKind::VariableText, "b"),
            element(ElementKind::VariableText, "c"),
        ],
        Canvas::default(),
        &r,
    )
    .unwrap();
    let before = ids(&c);

    assert!(!c.reorder(&before[0], true));
    assert!(!c.reorder(&before[2], false));
    assert_eq!(ids(&c), before);

    assert!(c.reorder(&before[1], true));
    assert_eq!(ids(&c), vec![before[1].clone(), before[0].clone(), before[2].clone()]);
    assert!(c.reorder(&before[1], false));
    assert_eq!(ids(&c), before);
}

#[test]
fn preview_crops_to_painted_area_and_mirrors_positions() {
    let r = rasterizer();
    let mut left = element(ElementKind::CounterText, "a");
    left.set_rect(LayoutRect::new(0, 0, 100, 100)).unwrap();
    let mut right = element(ElementKind::CounterText, "b");
    right.set_rect(LayoutRect::new(300, 0, 400, 50)).unwrap();
    let right_id = right.id().clone();

    let mut c = LayoutCollection::new("p1", vec![left, right], Canvas::default(), &r).unwrap();
    let preview = c.preview().unwrap().clone();
    assert_eq!(preview.dimensions(), (400, 100));
    assert!(preview.get_pixel(350, 75).0[3] == 0);

    c.toggle_mirror(&r).unwrap();
    assert!(c.mirror());
    let t = c.mirror_transform();
    assert_eq!(t.element_x(c.element(&right_id).unwrap().rect()), 0);
    let mirrored = c.preview().unwrap();
    assert_eq!(mirrored.dimensions(), (400, 100));
    // The short element now sits on the left.
    assert!(mirrored.get_pixel(50, 75).0[3] == 0);
    assert!(mirrored.get_pixel(350, 75).0[3] > 0);
}

#[test]
fn placement_setters_keep_positive_size() {
    let r = rasterizer();
    let mut c = LayoutCollection::new(
        "p1",
        vec![element(ElementKind::VariableText, "name")],
        Canvas::default(),
        &r,
    )
    .unwrap();
    c.set_display_size(150, 30).unwrap();
    assert_eq!((c.width(), c.height()), (150, 30));
    c.translate(-330, 0);
    assert_eq!(c.rect().left, 0);
    assert!(c.set_rect(LayoutRect::new(0, 0, 0, 10)).is_err());

    assert_eq!(c.placement_x(960, ScaleFactor::X1), 0);
    c.toggle_mirror(&r).unwrap();
    assert_eq!(c.placement_x(960, ScaleFactor::X1), 810);
}

#[test]
fn surface_paint_order_is_back_to_front() {
    let r = rasterizer();
    let c = LayoutCollection::new(
        "p1",
        vec![
            element(ElementKind::VariableText, "top"),
            element(ElementKind::VariableText, "bottom"),
        ],
        Canvas::default(),
        &r,
    )
    .unwrap();
    let order = PlacementSurface::paint_order(&c);
    assert_eq!(order, vec![c.elements()[1].id().clone(), c.elements()[0].id().clone()]);
}

#[test]
fn display_preview_resizes_to_display_size() {
    let r = rasterizer();
    let mut c = LayoutCollection::new(
        "p1",
        vec![element(ElementKind::VariableImage, "character")],
        Canvas::default(),
        &r,
    )
    .unwrap();
    c.set_display_size(100, 50).unwrap();
    assert_eq!(c.display_preview(&r).unwrap().dimensions(), (100, 50));

    let id = c.elements()[0].id().clone();
    c.element_mut(&id).unwrap().set_alpha(128);
    assert!(c.preview().is_none());
}

#[test]
fn repeated_element_ids_are_rejected() {
    let r = rasterizer();
    let e = element(ElementKind::VariableText, "name");
    assert!(
        LayoutCollection::new("p1", vec![e.clone(), e.clone()], Canvas::default(), &r).is_err()
    );

    let mut c = LayoutCollection::new("p1", vec![e.clone()], Canvas::default(), &r).unwrap();
    assert!(c.add_element(e).is_err());
    assert_eq!(c.elements().len(), 1);
}

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

fn board_with(names: &[&str]) -> (LayoutBoard, Vec<CollectionId>) {
    let r = rasterizer();
    let mut board = LayoutBoard::new(Canvas::default());
    let ids = names
        .iter()
        .map(|n| {
            board
                .add_collection(n, vec![element(ElementKind::VariableText, "name")], &r)
                .unwrap()
        })
        .collect();
    (board, ids)
}

#[test]
fn duplicate_names_get_numeric_suffix() {
    let (board, ids) = board_with(&["player", "player", "player", "team"]);
    let names = ids
        .iter()
        .map(|id| board.collection(id).unwrap().name().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["player", "player_1", "player_2", "team"]);
    assert_eq!(board.unique_name("team"), "team_1");
    assert_eq!(board.unique_name("fresh"), "fresh");
}

#[test]
fn rename_deduplicates_against_others_only() {
    let (mut board, ids) = board_with(&["a", "b"]);
    assert_eq!(board.rename_collection(&ids[1], "a").unwrap(), "a_1");
    assert_eq!(board.rename_collection(&ids[0], "a").unwrap(), "a");
}

#[test]
fn removing_last_element_drops_collection() {
    let r = rasterizer();
    let mut board = LayoutBoard::new(Canvas::default());
    let a = element(ElementKind::VariableText, "a");
    let b = element(ElementKind::CounterText, "b");
    let (a_id, b_id) = (a.id().clone(), b.id().clone());
    let col = board.add_collection("p1", vec![a, b], &r).unwrap();

    board.remove_element(&col, &a_id).unwrap();
    assert_eq!(board.collection(&col).unwrap().elements().len(), 1);

    board.remove_element(&col, &b_id).unwrap();
    assert!(board.collection(&col).is_none());
    assert!(board.collections().is_empty());

    assert!(board.remove_element(&col, &b_id).is_err());
}

#[test]
fn out_of_bounds_collections_block_save() {
    let (mut board, ids) = board_with(&["in", "out"]);
    board.validate_for_save().unwrap();

    board.collection_mut(&ids[1]).unwrap().translate(-400, 0);
    let err = board.validate_for_save().unwrap_err();
    match &err {
        LayoutError::OutOfBounds(list) => assert_eq!(list, &vec![ids[1].clone()]),
        other => panic!("unexpected error: {other}"),
    }

    let path = std::env::temp_dir().join(format!(
        "stream_overlay_board_oob_{}.json",
        std::process::id()
    ));
    assert!(board.save(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn board_reorder_moves_toward_end_for_front() {
    let (mut board, ids) = board_with(&["a", "b", "c"]);
    assert!(!PlacementSurface::reorder(&mut board, &ids[2], true));
    assert!(!PlacementSurface::reorder(&mut board, &ids[0], false));

    assert!(PlacementSurface::reorder(&mut board, &ids[0], true));
    assert_eq!(
        board.paint_order(),
        vec![ids[1].clone(), ids[0].clone(), ids[2].clone()]
    );
}

#[test]
fn document_roundtrip_preserves_model() {
    let (mut board, ids) = board_with(&["p1", "p2"]);
    board.collection_mut(&ids[0]).unwrap().translate(-100, 10);
    board
        .collection_mut(&ids[1])
        .unwrap()
        .toggle_mirror(&rasterizer())
        .unwrap();

    let doc = board.to_document();
    let json = doc.to_json_string().unwrap();
    let back = LayoutBoard::from_document(LayoutDocument::from_json_str(&json).unwrap()).unwrap();

    assert_eq!(back.canvas(), board.canvas());
    assert_eq!(back.paint_order(), ids);
    for (a, b) in board.collections().iter().zip(back.collections()) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.rect(), b.rect());
        assert_eq!(a.mirror(), b.mirror());
        assert_eq!(a.elements().len(), b.elements().len());
        assert_eq!(a.elements()[0].id(), b.elements()[0].id());
        assert_eq!(a.elements()[0].rect(), b.elements()[0].rect());
        assert!(b.preview().is_none());
    }
}

#[test]
fn overflowing_positions_are_validation_errors() {
    let (board, _) = board_with(&["p1"]);
    let huge = LayoutRect::new(i32::MIN, 0, i32::MAX, 10);

    let mut doc = board.to_document();
    doc.collections[0].position = huge;
    let err = LayoutBoard::from_document(doc).unwrap_err();
    assert!(matches!(err, LayoutError::Validation(_)));

    let mut doc = board.to_document();
    doc.collections[0].elements[0].position = huge;
    let err = LayoutBoard::from_document(doc).unwrap_err();
    assert!(matches!(err, LayoutError::Validation(_)));

    let json = r#"{"canvas":{"width":960,"height":540},"collections":[{"id":"c","name":"c",
        "position":[-2147483648,0,2147483647,10],"width":4294967295,"height":10,"elements":[]}]}"#;
    let doc = LayoutDocument::from_json_str(json).unwrap();
    assert!(LayoutBoard::from_document(doc).is_err());
}

#[test]
fn repeated_ids_inside_a_document_are_rejected() {
    let (board, _) = board_with(&["p1", "p2"]);

    let mut doc = board.to_document();
    let dup = doc.collections[0].elements[0].clone();
    doc.collections[0].elements.push(dup);
    assert!(LayoutBoard::from_document(doc).is_err());

    let mut doc = board.to_document();
    doc.collections[1].id = doc.collections[0].id.clone();
    assert!(LayoutBoard::from_document(doc).is_err());
}

#[test]
fn collections_may_share_element_ids() {
    let (board, _) = board_with(&["p1", "p2"]);
    let mut doc = board.to_document();
    doc.collections[1].elements = doc.collections[0].elements.clone();

    let back = LayoutBoard::from_document(doc).unwrap();
    assert_eq!(
        back.collections()[0].elements()[0].id(),
        back.collections()[1].elements()[0].id()
    );
}

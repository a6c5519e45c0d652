use super::*;

#[test]
fn generated_ids_are_unique_and_prefixed() {
    let a = ElementId::generate();
    let b = ElementId::generate();
    assert_ne!(a, b);
    assert!(a.as_str().starts_with("id_"));
    assert!(CollectionId::generate().as_str().starts_with("col_"));
}

#[test]
fn ids_serialize_as_plain_strings() {
    let id = ElementId::new("id_0123456789");
    let s = serde_json::to_string(&id).unwrap();
    assert_eq!(s, "\"id_0123456789\"");
    let back: ElementId = serde_json::from_str(&s).unwrap();
    assert_eq!(back, id);
}

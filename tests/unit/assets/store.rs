use std::io::Cursor;

use super::*;

fn temp_root(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "stream_overlay_store_{tag}_{}_{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &Path, w: u32, h: u32, px: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, buf).unwrap();
}

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("a/./b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("../up.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./.").is_err());
}

#[test]
fn load_image_reads_native_size() {
    let root = temp_root("image");
    write_png(&root.join("logo.png"), 7, 3, [255, 0, 0, 255]);

    let store = AssetStore::new(&root);
    let bitmap = store.load_image("logo.png").unwrap();
    assert_eq!(bitmap.dimensions(), (7, 3));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn missing_image_is_asset_error() {
    let root = temp_root("missing");
    let store = AssetStore::new(&root);
    let err = store.load_image("nope.png").unwrap_err();
    assert!(matches!(err, LayoutError::Asset(_)));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn load_image_folder_keys_by_stem_and_skips_non_images() {
    let root = temp_root("folder");
    let dir = root.join("stocks");
    std::fs::create_dir_all(&dir).unwrap();
    write_png(&dir.join("0.png"), 2, 2, [0, 0, 0, 255]);
    write_png(&dir.join("3.png"), 2, 2, [255, 255, 255, 255]);
    std::fs::write(dir.join("notes.txt"), b"not an image").unwrap();

    let store = AssetStore::new(&root);
    let states = store.load_image_folder("stocks").unwrap();
    assert_eq!(states.keys().cloned().collect::<Vec<_>>(), vec!["0", "3"]);

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn empty_or_missing_folder_is_asset_error() {
    let root = temp_root("empty");
    std::fs::create_dir_all(root.join("empty")).unwrap();
    let store = AssetStore::new(&root);

    assert!(matches!(
        store.load_image_folder("empty").unwrap_err(),
        LayoutError::Asset(_)
    ));
    assert!(matches!(
        store.load_image_folder("absent").unwrap_err(),
        LayoutError::Asset(_)
    ));

    let _ = std::fs::remove_dir_all(&root);
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::decode::decode_image;
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::raster::bitmap::Bitmap;

/// Read-only access to overlay assets under a single root directory.
///
/// Every lookup takes a relative path which is normalized with [`normalize_rel_path`] before it
/// touches the filesystem. Assets are read once, when an element is created; failures surface as
/// [`LayoutError::Asset`] and no element is produced.
#[derive(Clone, Debug)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a relative asset path.
    pub fn resolve(&self, rel: &str) -> LayoutResult<PathBuf> {
        let norm = normalize_rel_path(rel)?;
        Ok(self.root.join(norm))
    }

    /// Raw bytes of an asset.
    pub fn read_bytes(&self, rel: &str) -> LayoutResult<Vec<u8>> {
        let path = self.resolve(rel)?;
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(|e| LayoutError::asset(format!("{e:#}")))
    }

    /// Decode an image asset into a premultiplied [`Bitmap`].
    pub fn load_image(&self, rel: &str) -> LayoutResult<Bitmap> {
        let bytes = self.read_bytes(rel)?;
        let bitmap = decode_image(&bytes)
            .map_err(|e| LayoutError::asset(format!("image '{rel}': {e}")))?;
        tracing::debug!(
            path = rel,
            width = bitmap.width(),
            height = bitmap.height(),
            "image asset loaded"
        );
        Ok(bitmap)
    }

    /// Load every decodable image in a folder, keyed by file stem.
    ///
    /// Undecodable files are skipped. A missing folder or one with no decodable image is an
    /// asset error.
    pub fn load_image_folder(&self, rel: &str) -> LayoutResult<BTreeMap<String, Bitmap>> {
        let dir = self.resolve(rel)?;
        let rd = std::fs::read_dir(&dir)
            .map_err(|e| LayoutError::asset(format!("read folder '{}': {e}", dir.display())))?;

        let mut paths = rd
            .flatten()
            .map(|entry| entry.path())
            .filter(|p| p.is_file())
            .collect::<Vec<_>>();
        paths.sort();

        let mut out = BTreeMap::new();
        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(bytes) = std::fs::read(&path) else {
                tracing::warn!(path = %path.display(), "skipping unreadable file");
                continue;
            };
            match decode_image(&bytes) {
                Ok(bitmap) => {
                    out.insert(stem.to_string(), bitmap);
                }
                Err(_) => {
                    tracing::debug!(path = %path.display(), "skipping non-image file");
                }
            }
        }

        if out.is_empty() {
            return Err(LayoutError::asset(format!(
                "folder '{}' contains no decodable images",
                dir.display()
            )));
        }
        tracing::debug!(path = rel, states = out.len(), "image folder loaded");
        Ok(out)
    }
}

/// Normalize and validate store-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> LayoutResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(LayoutError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(LayoutError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(LayoutError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(LayoutError::validation("asset path must contain a name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;

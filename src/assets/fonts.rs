use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{LayoutError, LayoutResult};

/// Font database shared by every text rasterization.
///
/// Faces can be referenced either by family name or by the file name they were loaded from
/// (e.g. `meiryo.ttc`), mirroring how overlay authors pick fonts from a fonts folder.
#[derive(Clone)]
pub struct FontBook {
    db: Arc<usvg::fontdb::Database>,
    by_file: HashMap<String, String>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.db.len())
            .field("files", &self.by_file.len())
            .finish()
    }
}

impl FontBook {
    /// Build the database from system fonts and/or a directory of `.ttf` / `.otf` / `.ttc`
    /// files. A configured but missing fonts directory is an asset error.
    pub fn load(system_fonts: bool, fonts_dir: Option<&Path>) -> LayoutResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        if system_fonts {
            db.load_system_fonts();
        }

        let mut by_file = HashMap::new();
        if let Some(dir) = fonts_dir {
            load_fonts_from_dir(&mut db, &mut by_file, dir)?;
        }
        tracing::debug!(faces = db.len(), files = by_file.len(), "font book ready");

        Ok(Self {
            db: Arc::new(db),
            by_file,
        })
    }

    /// A book with no faces; text renders as empty bitmaps.
    pub fn empty() -> Self {
        Self {
            db: Arc::new(usvg::fontdb::Database::new()),
            by_file: HashMap::new(),
        }
    }

    /// Number of loaded faces.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Family name to put in `font-family` for a face reference.
    pub fn family_for<'a>(&'a self, face: &'a str) -> &'a str {
        self.by_file.get(face).map(String::as_str).unwrap_or(face)
    }

    pub(crate) fn database(&self) -> Arc<usvg::fontdb::Database> {
        Arc::clone(&self.db)
    }

    pub(crate) fn resolver(&self) -> usvg::FontResolver<'static> {
        make_font_resolver()
    }
}

fn load_fonts_from_dir(
    db: &mut usvg::fontdb::Database,
    by_file: &mut HashMap<String, String>,
    dir: &Path,
) -> LayoutResult<()> {
    let rd = std::fs::read_dir(dir).map_err(|e| {
        LayoutError::asset(format!("read fonts dir '{}': {e}", dir.display()))
    })?;

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let Ok(bytes) = std::fs::read(&path) else {
            tracing::warn!(path = %path.display(), "skipping unreadable font file");
            continue;
        };

        let source = usvg::fontdb::Source::Binary(Arc::new(bytes));
        let ids = db.load_font_source(source);
        let family = ids
            .iter()
            .filter_map(|id| db.face(*id))
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()));
        if let (Some(family), Some(file_name)) =
            (family, path.file_name().and_then(|s| s.to_str()))
        {
            by_file.insert(file_name.to_string(), family);
        }
    }
    Ok(())
}

fn db_family(family: &usvg::FontFamily) -> usvg::fontdb::Family<'_> {
    use usvg::fontdb::Family;

    match family {
        usvg::FontFamily::Named(name) => Family::Name(name),
        usvg::FontFamily::Serif => Family::Serif,
        usvg::FontFamily::SansSerif => Family::SansSerif,
        usvg::FontFamily::Monospace => Family::Monospace,
        usvg::FontFamily::Cursive => Family::Cursive,
        usvg::FontFamily::Fantasy => Family::Fantasy,
    }
}

/// Resolver that falls back to sans-serif and then to any loaded face, so text always renders
/// when at least one font is available.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, db| {
            let families: Vec<_> = font
                .families()
                .iter()
                .map(db_family)
                .chain([usvg::fontdb::Family::SansSerif])
                .collect();
            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: match font.style() {
                    usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                    usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                    usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
                },
            };
            db.query(&query).or_else(|| db.faces().next().map(|face| face.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;

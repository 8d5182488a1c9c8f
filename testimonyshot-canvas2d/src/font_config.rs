//! Font sources and their resolution into a shared font database.

use std::path::PathBuf;
use std::sync::Arc;

/// Families tried, in order, for the generic `sans-serif` family.
pub const DEFAULT_SANS_SERIF: &[&str] = &[
    "Inter",
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
];

/// Where fonts come from. Resolve it once with [`FontConfig::resolve`] and
/// share the result between canvases.
#[derive(Clone, Debug)]
pub struct FontConfig {
    pub load_system_fonts: bool,
    /// Directories scanned recursively for font files.
    pub font_dirs: Vec<PathBuf>,
    pub custom_fonts: Vec<CustomFont>,
    /// Candidates for `sans-serif`; the first installed one wins.
    pub sans_serif: Vec<String>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
            custom_fonts: Vec::new(),
            sans_serif: DEFAULT_SANS_SERIF.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Font file bytes (TTF, OTF or a collection).
#[derive(Clone, Debug)]
pub struct CustomFont {
    pub data: Arc<Vec<u8>>,
    /// Extra family name the faces can be selected by.
    pub family_name: Option<String>,
}

impl FontConfig {
    /// Scan and load every configured source.
    pub fn resolve(&self) -> ResolvedFontConfig {
        let mut db = fontdb::Database::new();
        if self.load_system_fonts {
            db.load_system_fonts();
        }
        for dir in &self.font_dirs {
            log::debug!("Loading fonts from {}", dir.display());
            db.load_fonts_dir(dir);
        }
        for font in &self.custom_fonts {
            register_custom_font(&mut db, font);
        }

        let sans_serif = self
            .sans_serif
            .iter()
            .find(|family| has_family(&db, family));
        match sans_serif {
            Some(family) => db.set_sans_serif_family(family.as_str()),
            None => log::warn!("None of the sans-serif fonts {:?} is installed", self.sans_serif),
        }
        log::debug!("Resolved {} font faces", db.len());

        ResolvedFontConfig { fontdb: db }
    }
}

fn register_custom_font(db: &mut fontdb::Database, font: &CustomFont) {
    let data: Arc<dyn AsRef<[u8]> + Send + Sync> = font.data.clone();
    let ids = db.load_font_source(fontdb::Source::Binary(data));
    if ids.is_empty() {
        log::warn!("Ignoring custom font that could not be parsed");
    }
    let Some(alias) = &font.family_name else {
        return;
    };
    for id in ids {
        let Some(mut face) = db.face(id).cloned() else {
            continue;
        };
        db.remove_face(id);
        face.families
            .insert(0, (alias.clone(), fontdb::Language::English_UnitedStates));
        db.push_face_info(face);
    }
}

fn has_family(db: &fontdb::Database, family: &str) -> bool {
    db.faces().any(|face| {
        face.families
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(family))
    })
}

/// A loaded font database. Cloning copies the face list, not the files.
#[derive(Clone)]
pub struct ResolvedFontConfig {
    pub(crate) fontdb: fontdb::Database,
}

impl ResolvedFontConfig {
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    pub fn has_family(&self, family: &str) -> bool {
        has_family(&self.fontdb, family)
    }
}

impl std::fmt::Debug for ResolvedFontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFontConfig")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

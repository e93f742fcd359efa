//! Font configuration shared by drawing contexts.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Fonts available to text operations.
///
/// Resolving a configuration scans the file system once; the resulting
/// [`ResolvedFontConfig`] can be cloned into any number of contexts.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Raw TTF/OTF data registered in addition to system fonts.
    pub custom_fonts: Vec<Arc<Vec<u8>>>,
    pub generic_families: GenericFamilyMap,
    pub load_system_fonts: bool,
    /// Extra directories scanned for font files.
    pub font_dirs: Vec<PathBuf>,
    /// Grid-fit glyph outlines. Off by default so text scales smoothly
    /// with the current transform.
    pub hinting_enabled: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            custom_fonts: Vec::new(),
            generic_families: GenericFamilyMap::defaults(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
            hinting_enabled: false,
        }
    }
}

impl FontConfig {
    /// Configuration that only sees explicitly registered fonts.
    pub fn empty() -> Self {
        Self {
            load_system_fonts: false,
            ..Self::default()
        }
    }

    pub fn with_font_data(mut self, data: Vec<u8>) -> Self {
        self.custom_fonts.push(Arc::new(data));
        self
    }

    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }

    pub fn resolve(&self) -> ResolvedFontConfig {
        ResolvedFontConfig::new(self)
    }
}

/// Concrete families tried, in order, for each CSS generic family.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenericFamilyMap {
    pub serif: Vec<String>,
    pub sans_serif: Vec<String>,
    pub monospace: Vec<String>,
    pub cursive: Vec<String>,
    pub fantasy: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl GenericFamilyMap {
    pub fn defaults() -> Self {
        Self {
            serif: names(&["Times New Roman", "Times", "Liberation Serif", "DejaVu Serif"]),
            sans_serif: names(&["Arial", "Helvetica", "Liberation Sans", "DejaVu Sans"]),
            monospace: names(&["Courier New", "Courier", "Liberation Mono", "DejaVu Sans Mono"]),
            cursive: names(&["Comic Sans MS", "Apple Chancery"]),
            fantasy: names(&["Impact", "Papyrus"]),
        }
    }

    /// Point each generic family of `db` at the first listed family it has.
    fn apply(&self, db: &mut fontdb::Database) {
        let available: HashSet<String> = db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        let pick = |list: &[String]| list.iter().find(|name| available.contains(*name)).cloned();

        if let Some(name) = pick(&self.serif) {
            db.set_serif_family(name);
        }
        if let Some(name) = pick(&self.sans_serif) {
            db.set_sans_serif_family(name);
        }
        if let Some(name) = pick(&self.monospace) {
            db.set_monospace_family(name);
        }
        if let Some(name) = pick(&self.cursive) {
            db.set_cursive_family(name);
        }
        if let Some(name) = pick(&self.fantasy) {
            db.set_fantasy_family(name);
        }
    }
}

/// A [`FontConfig`] loaded into a font database.
#[derive(Clone)]
pub struct ResolvedFontConfig {
    pub(crate) fontdb: fontdb::Database,
    pub(crate) hinting_enabled: bool,
}

impl std::fmt::Debug for ResolvedFontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFontConfig")
            .field("faces", &self.fontdb.len())
            .field("hinting_enabled", &self.hinting_enabled)
            .finish()
    }
}

impl ResolvedFontConfig {
    pub fn new(config: &FontConfig) -> Self {
        let mut db = fontdb::Database::new();
        if config.load_system_fonts {
            db.load_system_fonts();
        }
        for dir in &config.font_dirs {
            db.load_fonts_dir(dir);
        }
        for data in &config.custom_fonts {
            db.load_font_data(data.as_ref().clone());
        }
        config.generic_families.apply(&mut db);
        log::debug!(target: "canvas", "resolved font config with {} faces", db.len());

        Self {
            fontdb: db,
            hinting_enabled: config.hinting_enabled,
        }
    }

    /// Number of font faces available.
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }
}

//! FontLoader trait and the loaded font handle.
//!
//! The engine never touches storage directly: raw font bytes come from a
//! [`FontLoader`], which can be backed by an asset directory, memory, or
//! anything else the host provides.

use fontcast_types::FontSource;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for font loading operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FontError {
    #[error("Font not found: {0}")]
    NotFound(String),

    #[error("Failed to load font '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Malformed font data in '{path}': {message}")]
    Malformed { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl FontError {
    /// Whether retrying the same source later could succeed.
    ///
    /// A font that is missing now may be packaged later, and I/O errors are
    /// environmental. Malformed data stays malformed.
    pub fn is_transient(&self) -> bool {
        matches!(self, FontError::NotFound(_) | FontError::Io(_))
    }
}

impl From<std::io::Error> for FontError {
    fn from(err: std::io::Error) -> Self {
        FontError::Io(err.to_string())
    }
}

/// Shared font data type (reference-counted bytes).
pub type SharedFontData = Arc<Vec<u8>>;

/// A trait for loading raw font files.
///
/// # Implementations
///
/// - `AssetFontLoader` (fontcast-resource): bundled assets and absolute files
/// - [`InMemoryFontLoader`]: pre-populated memory, used by tests and embedders
pub trait FontLoader: Send + Sync + Debug {
    /// Load the raw bytes of a font file.
    fn load_font(&self, source: &FontSource) -> Result<SharedFontData, FontError>;

    /// Check if a font source can be loaded.
    fn exists(&self, source: &FontSource) -> bool;

    /// Returns a human-readable name for this loader (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// sfnt version tags accepted as font data.
const FONT_TAGS: [&[u8; 4]; 5] = [b"\x00\x01\x00\x00", b"OTTO", b"true", b"typ1", b"ttcf"];

struct FontFace {
    source: FontSource,
    data: SharedFontData,
    family: Option<String>,
}

/// An immutable, shareable font resource.
///
/// Cloning is cheap and every clone refers to the same face. Equality is
/// reference identity: two handles are equal only when they come from the
/// same load.
#[derive(Clone)]
pub struct LoadedFont(Arc<FontFace>);

impl LoadedFont {
    /// Wraps raw font bytes after checking they look like an OpenType font or
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns `FontError::Malformed` if the header is not a known font tag.
    pub fn from_data(source: FontSource, data: SharedFontData) -> Result<Self, FontError> {
        let Some(tag) = data.get(..4) else {
            return Err(FontError::Malformed {
                path: source.to_string(),
                message: format!("only {} bytes of data", data.len()),
            });
        };
        if !FONT_TAGS.iter().any(|t| t.as_slice() == tag) {
            return Err(FontError::Malformed {
                path: source.to_string(),
                message: format!("unknown font tag {:02x?}", tag),
            });
        }

        let family = family_name(&data);
        if family.is_none() {
            log::debug!("No family name in '{}', keeping it anonymous", source);
        }

        Ok(Self(Arc::new(FontFace {
            source,
            data,
            family,
        })))
    }

    /// The source this font was loaded from.
    pub fn source(&self) -> &FontSource {
        &self.0.source
    }

    /// The raw font bytes.
    pub fn data(&self) -> &SharedFontData {
        &self.0.data
    }

    /// The family name from the `name` table, when the face parses.
    pub fn family(&self) -> Option<&str> {
        self.0.family.as_deref()
    }

    /// True if both handles refer to the same loaded face.
    pub fn ptr_eq(a: &LoadedFont, b: &LoadedFont) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl PartialEq for LoadedFont {
    fn eq(&self, other: &Self) -> bool {
        LoadedFont::ptr_eq(self, other)
    }
}

impl Eq for LoadedFont {}

impl Debug for LoadedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedFont")
            .field("source", &self.0.source)
            .field("family", &self.0.family)
            .field("data_len", &self.0.data.len())
            .finish()
    }
}

fn family_name(data: &[u8]) -> Option<String> {
    let face = ttf_parser::Face::parse(data, 0).ok()?;

    // Typographic family (nameID 16) first, then the legacy family (nameID 1).
    face.names()
        .into_iter()
        .find(|n| n.name_id == ttf_parser::name_id::TYPOGRAPHIC_FAMILY)
        .and_then(|n| n.to_string())
        .or_else(|| {
            face.names()
                .into_iter()
                .find(|n| n.name_id == ttf_parser::name_id::FAMILY)
                .and_then(|n| n.to_string())
        })
}

/// An in-memory font loader.
///
/// Fonts are stored in memory and must be pre-populated before use.
#[derive(Debug, Default)]
pub struct InMemoryFontLoader {
    fonts: RwLock<HashMap<FontSource, SharedFontData>>,
}

impl InMemoryFontLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add font bytes under the given source.
    ///
    /// # Errors
    ///
    /// Returns `FontError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, source: FontSource, data: Vec<u8>) -> Result<(), FontError> {
        self.add_shared(source, Arc::new(data))
    }

    /// Add font bytes from shared data.
    ///
    /// # Errors
    ///
    /// Returns `FontError::LoadFailed` if the internal lock is poisoned.
    pub fn add_shared(&self, source: FontSource, data: SharedFontData) -> Result<(), FontError> {
        let mut fonts = self.fonts.write().map_err(|_| FontError::LoadFailed {
            path: source.to_string(),
            message: "font store lock poisoned".to_string(),
        })?;
        fonts.insert(source, data);
        Ok(())
    }

    /// Remove a font from the store.
    ///
    /// Returns `None` if the lock is poisoned or the font doesn't exist.
    pub fn remove(&self, source: &FontSource) -> Option<SharedFontData> {
        self.fonts.write().ok()?.remove(source)
    }

    /// Get the number of fonts in the store.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.fonts.read().map(|f| f.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty or the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.fonts.read().map(|f| f.is_empty()).unwrap_or(true)
    }
}

impl FontLoader for InMemoryFontLoader {
    fn load_font(&self, source: &FontSource) -> Result<SharedFontData, FontError> {
        let fonts = self.fonts.read().map_err(|_| FontError::LoadFailed {
            path: source.to_string(),
            message: "font store lock poisoned".to_string(),
        })?;
        fonts
            .get(source)
            .cloned()
            .ok_or_else(|| FontError::NotFound(source.to_string()))
    }

    fn exists(&self, source: &FontSource) -> bool {
        self.fonts
            .read()
            .map(|f| f.contains_key(source))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryFontLoader"
    }
}

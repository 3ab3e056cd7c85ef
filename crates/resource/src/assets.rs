//! Filesystem-backed font loader for native platforms.
//!
//! Asset sources are resolved relative to an asset root with the same
//! traversal checks the engine applies to any untrusted path: nothing may
//! escape the root. File sources are absolute by construction and are read
//! as given, unless file access has been switched off.

use fontcast_traits::{FontError, FontLoader, SharedFontData};
use fontcast_types::{FontSource, SourceKind};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Loads fonts from a bundled asset directory and from absolute paths.
#[derive(Debug)]
pub struct AssetFontLoader {
    asset_root: PathBuf,
    /// Canonicalized asset root for security checks
    canonical_root: Option<PathBuf>,
    file_access: bool,
}

impl AssetFontLoader {
    /// Creates a loader whose asset namespace is rooted at `asset_root`.
    pub fn new<P: AsRef<Path>>(asset_root: P) -> Self {
        let root = asset_root.as_ref().to_path_buf();
        // May fail if the directory is packaged later; checks fall back to components.
        let canonical = root.canonicalize().ok();
        Self {
            asset_root: root,
            canonical_root: canonical,
            file_access: true,
        }
    }

    /// Allows or refuses absolute file sources. Allowed by default.
    pub fn with_file_access(mut self, enabled: bool) -> Self {
        self.file_access = enabled;
        self
    }

    /// Returns the asset root for this loader.
    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Maps a source to the path that would be read.
    ///
    /// Returns `None` if an asset path would escape the asset root or if
    /// file access is disabled for absolute sources.
    fn resolve(&self, source: &FontSource) -> Option<PathBuf> {
        match source.kind() {
            SourceKind::File => self.file_access.then(|| PathBuf::from(source.as_str())),
            SourceKind::Asset => self.resolve_asset_safe(source.as_str()),
        }
    }

    fn resolve_asset_safe(&self, path: &str) -> Option<PathBuf> {
        if Path::new(path).is_absolute() {
            return None;
        }

        let full_path = self.asset_root.join(path);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref root) = self.canonical_root
        {
            return canonical.starts_with(root).then_some(canonical);
        }

        // Not on disk (yet): reject any parent component outright.
        if Path::new(path)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        Some(full_path)
    }
}

impl FontLoader for AssetFontLoader {
    fn load_font(&self, source: &FontSource) -> Result<SharedFontData, FontError> {
        let full_path = self.resolve(source).ok_or_else(|| {
            log::warn!("Refusing to load font '{}' outside the asset root", source);
            FontError::NotFound(format!("{} (outside asset root)", source))
        })?;

        log::debug!("Reading font '{}' from {}", source, full_path.display());
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FontError::NotFound(source.to_string())
            } else {
                FontError::LoadFailed {
                    path: source.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, source: &FontSource) -> bool {
        self.resolve(source).map(|p| p.is_file()).unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "AssetFontLoader"
    }
}

//! Font source identities.
//!
//! A [`FontSource`] names where a font file lives: either a path inside the
//! bundled asset namespace or an absolute filesystem path. Sources compare by
//! their normalized path string, so `fonts//Roboto.ttf` and
//! `./fonts/Roboto.ttf` are the same source and share one cache entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Where a [`FontSource`] is looked up.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    /// Relative to the application's bundled asset root.
    Asset,
    /// An absolute path on the local filesystem.
    File,
}

/// An immutable, normalized font location.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FontSource {
    kind: SourceKind,
    path: String,
}

impl FontSource {
    /// Parses a font path as it appears in configuration or theme attributes.
    ///
    /// Returns `None` for empty or whitespace-only input, which callers treat
    /// as "no font declared".
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let unified = raw.replace('\\', "/");
        let absolute = unified.starts_with('/') || Path::new(raw).is_absolute();

        let mut normalized = String::with_capacity(unified.len() + 1);
        if absolute && unified.starts_with('/') {
            normalized.push('/');
        }
        let mut first = true;
        for segment in unified.split('/') {
            if segment.is_empty() || segment == "." {
                continue;
            }
            if !first {
                normalized.push('/');
            }
            normalized.push_str(segment);
            first = false;
        }
        if first {
            // Only separators and dots.
            return None;
        }

        Some(Self {
            kind: if absolute { SourceKind::File } else { SourceKind::Asset },
            path: normalized,
        })
    }

    /// A source inside the bundled asset namespace.
    pub fn asset(path: &str) -> Option<Self> {
        Self::parse(path.trim_start_matches(['/', '\\']))
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// The normalized path; this is the cache identity.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    pub fn is_asset(&self) -> bool {
        self.kind == SourceKind::Asset
    }

    /// The file name component, handy for log lines.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<str> for FontSource {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl TryFrom<String> for FontSource {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("'{}' is not a font path", value))
    }
}

impl From<FontSource> for String {
    fn from(source: FontSource) -> Self {
        source.path
    }
}

//! Font name substitution.
//!
//! A [`FontMapper`] is the last step of resolution: whatever font path the
//! attribute cascade or the configured default produced is passed through it
//! before the cache is consulted. Deployments use it to redirect one font to
//! another everywhere without touching call sites.

use fontcast_types::FontSource;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type MapFn = dyn Fn(&str) -> String + Send + Sync;

#[derive(Clone, Default)]
enum Mapping {
    #[default]
    Identity,
    Table(Arc<HashMap<String, String>>),
    Custom(Arc<MapFn>),
}

/// A pure `resolved name -> final name` function.
#[derive(Clone, Default)]
pub struct FontMapper(Mapping);

impl FontMapper {
    /// Leaves every name untouched.
    pub fn identity() -> Self {
        Self(Mapping::Identity)
    }

    /// Wraps an arbitrary substitution function. It must not have side effects.
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Mapping::Custom(Arc::new(f)))
    }

    /// Substitutes names found in `table`; other names pass through.
    ///
    /// Keys and lookups are compared as normalized font paths, so
    /// `./fonts/A.ttf` matches a `fonts/A.ttf` entry.
    pub fn from_table<K, V>(table: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let table = table
            .into_iter()
            .map(|(k, v)| (normalize(k.as_ref()).into_owned(), v.into()))
            .collect();
        Self(Mapping::Table(Arc::new(table)))
    }

    pub fn is_identity(&self) -> bool {
        matches!(self.0, Mapping::Identity)
    }

    /// Maps a resolved font name to the name that should actually be loaded.
    pub fn map<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match &self.0 {
            Mapping::Identity => Cow::Borrowed(name),
            Mapping::Table(table) => match table.get(normalize(name).as_ref()) {
                Some(mapped) => Cow::Owned(mapped.clone()),
                None => Cow::Borrowed(name),
            },
            Mapping::Custom(f) => Cow::Owned(f(name)),
        }
    }
}

fn normalize(name: &str) -> Cow<'_, str> {
    match FontSource::parse(name) {
        Some(source) if source.as_str() != name => Cow::Owned(source.as_str().to_string()),
        _ => Cow::Borrowed(name),
    }
}

impl fmt::Debug for FontMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Mapping::Identity => f.write_str("FontMapper::Identity"),
            Mapping::Table(table) => f
                .debug_struct("FontMapper::Table")
                .field("entries", &table.len())
                .finish(),
            Mapping::Custom(_) => f.write_str("FontMapper::Custom"),
        }
    }
}

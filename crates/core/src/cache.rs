//! Memoized font loading.
//!
//! Each source gets its own `OnceCell`, so concurrent requests for one font
//! wait for a single load while requests for other fonts proceed in parallel.
//! The map lock is only held long enough to find or create the cell. Failed
//! loads leave the cell empty: the next request tries again and, if the cause
//! persists, reports the same error.

use fontcast_traits::{FontError, FontLoader, LoadedFont};
use fontcast_types::FontSource;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

type Slot = Arc<OnceCell<LoadedFont>>;

/// Counters describing cache traffic since creation or the last `clear`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Successful loads through the loader.
    pub loads: usize,
    /// Requests answered from memory.
    pub hits: usize,
    /// Loader or decoding failures.
    pub failures: usize,
}

/// A process-lifetime store of loaded fonts keyed by normalized source.
pub struct FontCache {
    loader: Arc<dyn FontLoader>,
    slots: RwLock<HashMap<FontSource, Slot>>,
    loads: AtomicUsize,
    hits: AtomicUsize,
    failures: AtomicUsize,
}

impl FontCache {
    pub fn new(loader: Arc<dyn FontLoader>) -> Self {
        Self {
            loader,
            slots: RwLock::new(HashMap::new()),
            loads: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
        }
    }

    pub fn loader(&self) -> &Arc<dyn FontLoader> {
        &self.loader
    }

    /// Returns the font for `source`, loading it on first request.
    ///
    /// Every successful call for the same source returns the same
    /// `LoadedFont` handle, and the loader runs at most once per source
    /// however many threads ask.
    ///
    /// # Errors
    ///
    /// Returns the loader's `FontError`, or `FontError::Malformed` if the
    /// bytes are not a font. Failures are not cached.
    pub fn get_or_load(&self, source: &FontSource) -> Result<LoadedFont, FontError> {
        let slot = self.slot(source)?;
        if let Some(font) = slot.get() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("Font cache hit for '{}'", source);
            return Ok(font.clone());
        }

        let mut loaded_here = false;
        let result = slot.get_or_try_init(|| {
            loaded_here = true;
            self.load(source)
        });

        match result {
            Ok(font) => {
                if !loaded_here {
                    // Another thread finished the load while we waited.
                    self.hits.fetch_add(1, Ordering::Relaxed);
                }
                Ok(font.clone())
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    fn slot(&self, source: &FontSource) -> Result<Slot, FontError> {
        let poisoned = || FontError::LoadFailed {
            path: source.to_string(),
            message: "font cache lock poisoned".to_string(),
        };

        {
            let slots = self.slots.read().map_err(|_| poisoned())?;
            if let Some(slot) = slots.get(source) {
                return Ok(Arc::clone(slot));
            }
        }

        let mut slots = self.slots.write().map_err(|_| poisoned())?;
        Ok(Arc::clone(slots.entry(source.clone()).or_default()))
    }

    fn load(&self, source: &FontSource) -> Result<LoadedFont, FontError> {
        log::debug!("Loading font '{}' via {}", source, self.loader.name());
        let data = self.loader.load_font(source).inspect_err(|e| {
            if e.is_transient() {
                log::debug!("Font '{}' unavailable, will retry on next request: {}", source, e);
            }
        })?;
        let font = LoadedFont::from_data(source.clone(), data)?;
        self.loads.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Loaded font '{}' (family: {})",
            source,
            font.family().unwrap_or("unknown")
        );
        Ok(font)
    }

    /// Whether `source` has been loaded successfully.
    pub fn contains(&self, source: &FontSource) -> bool {
        self.slots
            .read()
            .map(|s| s.get(source).is_some_and(|slot| slot.get().is_some()))
            .unwrap_or(false)
    }

    /// Whether `font` is a handle this cache gave out.
    pub fn is_loaded(&self, font: &LoadedFont) -> bool {
        self.slots
            .read()
            .map(|s| {
                s.get(font.source())
                    .and_then(|slot| slot.get())
                    .is_some_and(|cached| LoadedFont::ptr_eq(cached, font))
            })
            .unwrap_or(false)
    }

    /// Number of loaded fonts.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .map(|s| s.values().filter(|slot| slot.get().is_some()).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            loads: self.loads.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    /// Drops every cached font and resets the counters.
    ///
    /// Handles already given out stay valid but are no longer recognized by
    /// [`is_loaded`](Self::is_loaded).
    pub fn clear(&self) {
        if let Ok(mut slots) = self.slots.write() {
            slots.clear();
        }
        self.loads.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache")
            .field("loader", &self.loader.name())
            .field("fonts", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

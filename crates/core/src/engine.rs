//! The engine handle and its hook into a construction pipeline.
//!
//! A pipeline owns one [`EngineSlot`]. The application installs a
//! [`FontEngine`] into it once at startup; from then on the pipeline calls
//! [`ComponentHook::on_component_created`] for every node it instantiates,
//! before attaching it, and never needs to know about fonts.

use crate::applicator::{ApplyReport, NodeOutcome, TreeApplicator};
use crate::cache::FontCache;
use crate::component::ComponentNode;
use crate::config::EngineConfig;
use crate::error::{ApplyError, EngineError};
use crate::resolver::FontResolver;
use fontcast_traits::{FontLoader, ThemeContext};
use fontcast_types::FontSource;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Called by a construction pipeline for each freshly created node.
pub trait ComponentHook: Send + Sync {
    /// Styles `node` in place. Children created later get their own call.
    ///
    /// # Errors
    ///
    /// Returns the per-node `ApplyError`; pipelines may collect or ignore it.
    fn on_component_created(
        &self,
        node: &mut ComponentNode,
        theme: &dyn ThemeContext,
    ) -> Result<NodeOutcome, ApplyError>;
}

/// A frozen configuration paired with the font cache it loads into.
#[derive(Debug, Clone)]
pub struct FontEngine {
    config: Arc<EngineConfig>,
    cache: Arc<FontCache>,
}

impl FontEngine {
    /// Creates an engine with a fresh cache over `loader`.
    pub fn new(config: EngineConfig, loader: Arc<dyn FontLoader>) -> Self {
        Self::with_cache(Arc::new(config), Arc::new(FontCache::new(loader)))
    }

    /// Creates an engine sharing an existing cache, e.g. one cache for several
    /// configurations in the same process.
    pub fn with_cache(config: Arc<EngineConfig>, cache: Arc<FontCache>) -> Self {
        Self { config, cache }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<FontCache> {
        &self.cache
    }

    pub fn applicator(&self) -> TreeApplicator<'_> {
        TreeApplicator::new(&self.config, &self.cache)
    }

    /// Styles the whole subtree rooted at `root`.
    pub fn apply(&self, root: &mut ComponentNode, theme: &dyn ThemeContext) -> ApplyReport {
        self.applicator().apply(root, theme)
    }

    /// The font that would be applied to `node`, without loading it.
    pub fn resolve(&self, node: &ComponentNode, theme: &dyn ThemeContext) -> Option<FontSource> {
        FontResolver::new(&self.config).resolve(node, theme)
    }
}

impl ComponentHook for FontEngine {
    fn on_component_created(
        &self,
        node: &mut ComponentNode,
        theme: &dyn ThemeContext,
    ) -> Result<NodeOutcome, ApplyError> {
        self.applicator().apply_node(node, theme)
    }
}

/// Holds the engine installed for one construction pipeline.
#[derive(Debug, Default)]
pub struct EngineSlot {
    engine: OnceCell<Arc<FontEngine>>,
}

impl EngineSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `engine`. A pipeline takes exactly one engine for its lifetime.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::AlreadyInstalled` if an engine is already present.
    pub fn install(&self, engine: Arc<FontEngine>) -> Result<(), EngineError> {
        self.engine
            .set(engine)
            .map_err(|_| EngineError::AlreadyInstalled)?;
        log::info!("Font engine installed");
        Ok(())
    }

    pub fn get(&self) -> Option<&Arc<FontEngine>> {
        self.engine.get()
    }

    pub fn is_installed(&self) -> bool {
        self.engine.get().is_some()
    }
}

impl ComponentHook for EngineSlot {
    /// Without an installed engine every node is left alone.
    fn on_component_created(
        &self,
        node: &mut ComponentNode,
        theme: &dyn ThemeContext,
    ) -> Result<NodeOutcome, ApplyError> {
        match self.engine.get() {
            Some(engine) => engine.on_component_created(node, theme),
            None => Ok(NodeOutcome::Ineligible),
        }
    }
}

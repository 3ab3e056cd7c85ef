//! # fontcast
//!
//! Declare a default typeface (and per-class overrides) once, then have it
//! applied to every text-bearing component a UI construction pipeline
//! produces.
//!
//! ```ignore
//! let config = EngineConfig::builder()
//!     .with_default_font_path("fonts/Roboto-Regular.ttf")
//!     .add_custom_view_with_set_typeface("Gauge")
//!     .build();
//! let engine = FontEngine::new(config, Arc::new(AssetFontLoader::new("assets")));
//! let report = engine.apply(&mut tree, &theme);
//! ```
//!
//! Settings can also be read from a JSON file, see [`EngineSettings`].

pub mod error;
pub mod settings;

pub use error::SettingsError;
pub use settings::{CustomStyle, EngineSettings};

pub use fontcast_core::{
    ApplyError, ApplyReport, AttributeSet, CacheStats, ClassId, Component, ComponentHook,
    ComponentNode, ConfigurationError, Container, EngineConfig, EngineConfigBuilder, EngineError,
    EngineSlot, FontCache, FontEngine, FontMapper, FontResolver, NodeLocation, NodeOutcome,
    Resolution, ResolvedFrom, Text, TextKind, TreeApplicator, TypefaceAdapter, TypefaceSupport,
    TypefaceTarget, attrs, classes,
};
pub use fontcast_resource::AssetFontLoader;
pub use fontcast_traits::{
    FontError, FontLoader, InMemoryFontLoader, InMemoryTheme, LoadedFont, SharedFontData,
    ThemeContext,
};
pub use fontcast_types::{AttrId, FontSource, SourceKind};

//! # fontcast-core
//!
//! Typeface resolution and application for component trees.
//!
//! - **config**: the immutable [`EngineConfig`] and its builder
//! - **mapper**: [`FontMapper`], the final name substitution step
//! - **cache**: [`FontCache`], at-most-once font loading per source
//! - **resolver**: [`FontResolver`], which font applies to a node
//! - **applicator**: [`TreeApplicator`], styling a constructed subtree
//! - **engine**: [`FontEngine`] and the construction-pipeline hook
//!
//! ## Design Principle
//!
//! Nothing here touches storage or the host's theming system directly.
//! Fonts come from a `FontLoader` and attributes from a `ThemeContext`, both
//! defined in fontcast-traits.

// Re-export foundation crates
pub use fontcast_traits as traits;
pub use fontcast_types as types;

pub mod applicator;
pub mod cache;
pub mod component;
pub mod config;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod resolver;

pub use applicator::{ApplyReport, NodeOutcome, TreeApplicator};
pub use cache::{CacheStats, FontCache};
pub use component::{
    AttributeSet, Component, ComponentNode, Container, Text, TextKind, TypefaceAdapter,
    TypefaceTarget,
};
pub use config::{EngineConfig, EngineConfigBuilder, TypefaceSupport};
pub use engine::{ComponentHook, EngineSlot, FontEngine};
pub use error::{ApplyError, ConfigurationError, EngineError, NodeLocation};
pub use mapper::FontMapper;
pub use resolver::{FontResolver, Resolution, ResolvedFrom};

// Re-export commonly used types from foundation crates
pub use fontcast_traits::{FontError, FontLoader, LoadedFont, ThemeContext};
pub use fontcast_types::{AttrId, ClassId, FontSource, attrs, classes};

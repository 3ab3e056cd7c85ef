//! Foundation value types for the fontcast engine.
//!
//! Nothing in here performs I/O. The types identify fonts, component classes
//! and theme attribute slots, and are shared by every other crate.

pub mod ids;
pub mod source;

pub use ids::{AttrId, ClassId, attrs, classes};
pub use source::{FontSource, SourceKind};

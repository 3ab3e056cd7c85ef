//! Font loaders for the fontcast engine.
//!
//! This crate provides platform-specific implementations of the
//! `FontLoader` trait from fontcast-traits.
//!
//! ## Available Loaders
//!
//! - [`AssetFontLoader`]: Loads bundled assets from an asset root and absolute
//!   font files from the local filesystem
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory loader from fontcast-traits:
//! - [`InMemoryFontLoader`]: Pre-populated in-memory storage

mod assets;

pub use assets::AssetFontLoader;

// Re-export the in-memory loader from fontcast-traits for convenience
pub use fontcast_traits::InMemoryFontLoader;

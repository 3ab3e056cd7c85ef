//! Error types reported while styling component trees.
//!
//! None of these abort an application. Per-node problems are collected into
//! an `ApplyReport` and logged; the affected node keeps its platform font.

use fontcast_traits::FontError;
use fontcast_types::{ClassId, FontSource};
use std::fmt;
use thiserror::Error;

/// A registered class that cannot actually take a typeface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(
        "class '{class}' is registered for typeface assignment but does not expose the capability"
    )]
    MissingCapability { class: ClassId },

    #[error("adapter registered for '{class}' expects `{expected}`, found another widget type")]
    AdapterMismatch { class: ClassId, expected: &'static str },
}

/// Where a node sits in the tree being styled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLocation {
    /// Child indices from the subtree root; empty for the root itself.
    pub path: Vec<usize>,
    pub id: Option<String>,
    pub class: ClassId,
}

impl fmt::Display for NodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str("root")?;
        } else {
            let mut first = true;
            for index in &self.path {
                if !first {
                    f.write_str("/")?;
                }
                write!(f, "{}", index)?;
                first = false;
            }
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        write!(f, "({})", self.class)
    }
}

/// A problem with one node; the rest of the tree is still styled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("node {node}: {source}")]
    Configuration {
        node: NodeLocation,
        #[source]
        source: ConfigurationError,
    },

    #[error("node {node}: could not load font '{font}': {source}")]
    FontLoad {
        node: NodeLocation,
        font: FontSource,
        #[source]
        source: FontError,
    },
}

impl ApplyError {
    pub fn node(&self) -> &NodeLocation {
        match self {
            ApplyError::Configuration { node, .. } | ApplyError::FontLoad { node, .. } => node,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, ApplyError::Configuration { .. })
    }

    pub fn is_font_load(&self) -> bool {
        matches!(self, ApplyError::FontLoad { .. })
    }
}

/// Errors from wiring an engine into a construction pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("a font engine is already installed for this pipeline")]
    AlreadyInstalled,
}

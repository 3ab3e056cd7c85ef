//! Walks a constructed component subtree and assigns resolved fonts.
//!
//! Traversal is depth-first from the root, root included. A node is eligible
//! when it is a built-in text widget, or when custom typeface support is on
//! and its class was registered. Ineligible nodes are skipped but their
//! children are still visited, since a container can hold text.
//!
//! Styling is best-effort. A font that fails to load or a registered class
//! that lacks the capability produces one `ApplyError` for that node; the
//! node keeps its platform font and the walk carries on.

use crate::cache::FontCache;
use crate::component::{ComponentNode, TypefaceTarget};
use crate::config::{EngineConfig, TypefaceSupport};
use crate::error::{ApplyError, ConfigurationError, NodeLocation};
use crate::resolver::FontResolver;
use fontcast_traits::{LoadedFont, ThemeContext};
use fontcast_types::ClassId;

/// What happened to a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOutcome {
    /// Not a text widget and not a registered class.
    Ineligible,
    /// Eligible, but no font applies; the platform font stays.
    Untouched,
    /// Already carries a font from the same cache.
    AlreadyStyled,
    Styled,
    /// An `ApplyError` was reported for the node.
    Failed,
}

/// Summary of one application pass.
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    pub visited: usize,
    pub eligible: usize,
    pub styled: usize,
    pub untouched: usize,
    pub already_styled: usize,
    pub errors: Vec<ApplyError>,
}

impl ApplyReport {
    /// True when no node reported an error.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn font_load_errors(&self) -> impl Iterator<Item = &ApplyError> {
        self.errors.iter().filter(|e| e.is_font_load())
    }

    pub fn configuration_errors(&self) -> impl Iterator<Item = &ApplyError> {
        self.errors.iter().filter(|e| e.is_configuration())
    }

    fn record(&mut self, outcome: Result<NodeOutcome, ApplyError>) {
        self.visited += 1;
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                self.errors.push(e);
                NodeOutcome::Failed
            }
        };
        if outcome != NodeOutcome::Ineligible {
            self.eligible += 1;
        }
        match outcome {
            NodeOutcome::Styled => self.styled += 1,
            NodeOutcome::Untouched => self.untouched += 1,
            NodeOutcome::AlreadyStyled => self.already_styled += 1,
            NodeOutcome::Ineligible | NodeOutcome::Failed => {}
        }
    }
}

/// Applies fonts to component trees using one configuration and one cache.
#[derive(Debug, Clone, Copy)]
pub struct TreeApplicator<'a> {
    config: &'a EngineConfig,
    cache: &'a FontCache,
}

impl<'a> TreeApplicator<'a> {
    pub fn new(config: &'a EngineConfig, cache: &'a FontCache) -> Self {
        Self { config, cache }
    }

    /// Styles every eligible node in the subtree rooted at `root`.
    pub fn apply(&self, root: &mut ComponentNode, theme: &dyn ThemeContext) -> ApplyReport {
        let mut report = ApplyReport::default();
        let mut stack: Vec<(&mut ComponentNode, Vec<usize>)> = vec![(root, Vec::new())];

        while let Some((node, path)) = stack.pop() {
            report.record(self.style_node(node, theme, &path));

            for (index, child) in node.children_mut().iter_mut().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(index);
                stack.push((child, child_path));
            }
        }

        log::debug!(
            "Styled {} of {} eligible nodes ({} visited, {} errors)",
            report.styled,
            report.eligible,
            report.visited,
            report.errors.len()
        );
        report
    }

    /// Styles `node` alone, without visiting its children.
    ///
    /// # Errors
    ///
    /// Returns the `ApplyError` that was also logged for the node.
    pub fn apply_node(
        &self,
        node: &mut ComponentNode,
        theme: &dyn ThemeContext,
    ) -> Result<NodeOutcome, ApplyError> {
        self.style_node(node, theme, &[])
    }

    fn style_node(
        &self,
        node: &mut ComponentNode,
        theme: &dyn ThemeContext,
        path: &[usize],
    ) -> Result<NodeOutcome, ApplyError> {
        let class = node.class_id();
        let builtin = node.widget().as_text().is_some();
        let support = if builtin || !self.config.is_custom_view_typeface_support() {
            None
        } else {
            match self.config.typeface_support(&class) {
                Some(support) => Some(support),
                None => return Ok(NodeOutcome::Ineligible),
            }
        };
        if !builtin && support.is_none() {
            return Ok(NodeOutcome::Ineligible);
        }

        if let Some(support) = support
            && let Err(source) = probe(node, &class, support)
        {
            let err = ApplyError::Configuration {
                node: location(node, path),
                source,
            };
            log::warn!("{}", err);
            return Err(err);
        }

        if let Some(current) = current_typeface(node, support)
            && self.cache.is_loaded(&current)
        {
            return Ok(NodeOutcome::AlreadyStyled);
        }

        let Some(source) = FontResolver::new(self.config).resolve(node, theme) else {
            return Ok(NodeOutcome::Untouched);
        };

        let font = match self.cache.get_or_load(&source) {
            Ok(font) => font,
            Err(source_err) => {
                let err = ApplyError::FontLoad {
                    node: location(node, path),
                    font: source,
                    source: source_err,
                };
                log::warn!("{}", err);
                return Err(err);
            }
        };

        if let Err(source) = assign(node, &class, support, font) {
            let err = ApplyError::Configuration {
                node: location(node, path),
                source,
            };
            log::warn!("{}", err);
            return Err(err);
        }
        log::debug!("Applied '{}' to {}", source, location(node, path));
        Ok(NodeOutcome::Styled)
    }
}

fn location(node: &ComponentNode, path: &[usize]) -> NodeLocation {
    NodeLocation {
        path: path.to_vec(),
        id: node.id().map(str::to_string),
        class: node.class_id(),
    }
}

/// Checks that a registered custom widget really has the capability.
fn probe(
    node: &mut ComponentNode,
    class: &ClassId,
    support: &TypefaceSupport,
) -> Result<(), ConfigurationError> {
    let capable = match support {
        TypefaceSupport::Declared => node
            .widget_mut()
            .typeface_target()
            .is_some_and(|t| t.supports_typeface_assignment()),
        TypefaceSupport::Adapter(adapter) => {
            if !adapter.accepts(node.widget().as_any()) {
                return Err(ConfigurationError::AdapterMismatch {
                    class: class.clone(),
                    expected: adapter.target_type(),
                });
            }
            true
        }
    };
    if capable {
        Ok(())
    } else {
        Err(ConfigurationError::MissingCapability {
            class: class.clone(),
        })
    }
}

fn current_typeface(
    node: &mut ComponentNode,
    support: Option<&TypefaceSupport>,
) -> Option<LoadedFont> {
    match support {
        None => node.text_typeface().cloned(),
        Some(TypefaceSupport::Declared) => node
            .widget_mut()
            .typeface_target()
            .and_then(|t| t.typeface().cloned()),
        Some(TypefaceSupport::Adapter(_)) => None,
    }
}

fn assign(
    node: &mut ComponentNode,
    class: &ClassId,
    support: Option<&TypefaceSupport>,
    font: LoadedFont,
) -> Result<(), ConfigurationError> {
    let missing = || ConfigurationError::MissingCapability {
        class: class.clone(),
    };
    match support {
        None => {
            let text = node.widget_mut().as_text_mut().ok_or_else(missing)?;
            text.set_typeface(font);
        }
        Some(TypefaceSupport::Declared) => {
            let target = node.widget_mut().typeface_target().ok_or_else(missing)?;
            target.set_typeface(font);
        }
        Some(TypefaceSupport::Adapter(adapter)) => {
            if !adapter.assign(node.widget_mut().as_any_mut(), font) {
                return Err(ConfigurationError::AdapterMismatch {
                    class: class.clone(),
                    expected: adapter.target_type(),
                });
            }
        }
    }
    Ok(())
}

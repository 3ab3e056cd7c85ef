//! ThemeContext trait for abstracting theme attribute lookup.
//!
//! The engine reads font declarations out of the host's presentation theme.
//! Only two lookups are needed: a theme-level attribute (which, for style
//! attributes, names a style) and an attribute inside a named style.

use fontcast_types::AttrId;
use std::collections::HashMap;
use std::fmt::Debug;

/// Styles deeper than this are treated as a cycle.
const MAX_STYLE_DEPTH: usize = 16;

/// The theme/attribute lookup surface supplied by the host.
pub trait ThemeContext: Debug {
    /// Resolves a theme attribute to its value.
    ///
    /// For style attributes such as `attrs::BUTTON_STYLE` the value is the
    /// name of the style the theme assigns to that class.
    fn attribute_value(&self, attr: AttrId) -> Option<String>;

    /// Looks up an attribute inside a named style, including its parents.
    fn style_value(&self, style: &str, attr: AttrId) -> Option<String>;
}

#[derive(Debug, Clone, Default)]
struct StyleDef {
    parent: Option<String>,
    values: HashMap<AttrId, String>,
}

/// A theme held entirely in memory.
///
/// ```ignore
/// let theme = InMemoryTheme::new()
///     .with_attribute(attrs::BUTTON_STYLE, "Widget.Button")
///     .with_style_value("Widget.Button", attrs::FONT_PATH, "fonts/Oswald.ttf");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTheme {
    attributes: HashMap<AttrId, String>,
    styles: HashMap<String, StyleDef>,
}

impl InMemoryTheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a theme-level attribute.
    pub fn with_attribute(mut self, attr: AttrId, value: impl Into<String>) -> Self {
        self.attributes.insert(attr, value.into());
        self
    }

    /// Declares `style` as inheriting from `parent`.
    pub fn with_style_parent(
        mut self,
        style: impl Into<String>,
        parent: impl Into<String>,
    ) -> Self {
        self.styles.entry(style.into()).or_default().parent = Some(parent.into());
        self
    }

    /// Sets an attribute inside a named style, creating the style if needed.
    pub fn with_style_value(
        mut self,
        style: impl Into<String>,
        attr: AttrId,
        value: impl Into<String>,
    ) -> Self {
        self.styles
            .entry(style.into())
            .or_default()
            .values
            .insert(attr, value.into());
        self
    }

    pub fn has_style(&self, style: &str) -> bool {
        self.styles.contains_key(style)
    }
}

impl ThemeContext for InMemoryTheme {
    fn attribute_value(&self, attr: AttrId) -> Option<String> {
        self.attributes.get(&attr).cloned()
    }

    fn style_value(&self, style: &str, attr: AttrId) -> Option<String> {
        let mut current = self.styles.get(style);
        for _ in 0..MAX_STYLE_DEPTH {
            let def = current?;
            if let Some(value) = def.values.get(&attr) {
                return Some(value.clone());
            }
            current = def.parent.as_deref().and_then(|p| self.styles.get(p));
        }
        log::warn!("Style chain for '{}' is deeper than {}, giving up", style, MAX_STYLE_DEPTH);
        None
    }
}

//! Decides which font applies to a node.
//!
//! Resolution is a pure function of the node's declared attributes, the theme
//! and the configuration. Highest precedence first:
//!
//! 1. A font declared for the node: its own attribute, then its style, then
//!    its text appearance, then the theme's default style for its class.
//! 2. The configured default font.
//! 3. Nothing: the node keeps the platform font.
//!
//! Whatever wins is passed through the configured `FontMapper` last.
//! Nothing is loaded here; that is the cache's job.

use crate::component::ComponentNode;
use crate::config::EngineConfig;
use fontcast_traits::ThemeContext;
use fontcast_types::FontSource;

/// Which step of the cascade produced a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedFrom {
    NodeAttribute,
    NodeStyle,
    TextAppearance,
    ThemeStyle,
    ConfigDefault,
}

/// A resolved font together with how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The source to load, after mapping.
    pub source: FontSource,
    /// The font path as declared, before mapping.
    pub declared: String,
    pub origin: ResolvedFrom,
}

#[derive(Debug, Clone, Copy)]
pub struct FontResolver<'a> {
    config: &'a EngineConfig,
}

impl<'a> FontResolver<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// The font source to apply to `node`, or `None` to leave it untouched.
    pub fn resolve(&self, node: &ComponentNode, theme: &dyn ThemeContext) -> Option<FontSource> {
        self.resolve_with_origin(node, theme).map(|r| r.source)
    }

    pub fn resolve_with_origin(
        &self,
        node: &ComponentNode,
        theme: &dyn ThemeContext,
    ) -> Option<Resolution> {
        let (declared, origin) = self.declared_font(node, theme).or_else(|| {
            self.config
                .font_path()
                .filter(|_| self.config.has_default_font())
                .map(|path| (path.to_string(), ResolvedFrom::ConfigDefault))
        })?;

        let mapped = self.config.font_mapper().map(&declared);
        let Some(source) = FontSource::parse(&mapped) else {
            log::debug!("Font '{}' mapped to '{}', which names no font", declared, mapped);
            return None;
        };
        if mapped != declared {
            log::debug!("Font mapper substituted '{}' -> '{}'", declared, source);
        }

        Some(Resolution {
            source,
            declared,
            origin,
        })
    }

    fn declared_font(
        &self,
        node: &ComponentNode,
        theme: &dyn ThemeContext,
    ) -> Option<(String, ResolvedFrom)> {
        let attr = self.config.attr_id();
        if !attr.is_valid() {
            return None;
        }
        let attrs = node.attrs();

        if let Some(path) = attrs.value(attr).filter(|v| names_font(v)) {
            return Some((path.to_string(), ResolvedFrom::NodeAttribute));
        }

        if let Some(path) = attrs
            .style()
            .and_then(|style| theme.style_value(style, attr))
            .filter(|v| names_font(v))
        {
            return Some((path, ResolvedFrom::NodeStyle));
        }

        if let Some(path) = attrs
            .text_appearance()
            .and_then(|style| theme.style_value(style, attr))
            .filter(|v| names_font(v))
        {
            return Some((path, ResolvedFrom::TextAppearance));
        }

        let class = node.class_id();
        self.config
            .style_attr_for(&class)
            .and_then(|style_attr| theme.attribute_value(style_attr))
            .and_then(|style| theme.style_value(&style, attr))
            .filter(|v| names_font(v))
            .map(|path| (path, ResolvedFrom::ThemeStyle))
    }
}

fn names_font(value: &str) -> bool {
    FontSource::parse(value).is_some()
}

//! Engine configuration.
//!
//! [`EngineConfig`] is assembled once at startup with [`EngineConfigBuilder`]
//! and never changes afterwards; a different configuration means building a
//! new one. Builder misuse (an empty class, an unset attribute id) is absorbed
//! as a no-op so that configuration can never stop an application launching.

use crate::component::{TextKind, TypefaceAdapter};
use crate::mapper::FontMapper;
use fontcast_types::{AttrId, ClassId, FontSource, attrs};
use std::collections::HashMap;

/// How a registered custom class receives its typeface.
#[derive(Debug, Clone)]
pub enum TypefaceSupport {
    /// The widget declares the capability itself via `Component::typeface_target`.
    Declared,
    /// An adapter registered with the class assigns the font.
    Adapter(TypefaceAdapter),
}

/// Immutable typeface configuration shared by every resolution.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    is_font_set: bool,
    font_path: Option<String>,
    default_source: Option<FontSource>,
    attr_id: AttrId,
    custom_view_typeface_support: bool,
    typeface_classes: HashMap<ClassId, TypefaceSupport>,
    class_styles: HashMap<ClassId, AttrId>,
    font_mapper: FontMapper,
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// True if a non-empty default font path was configured.
    pub fn has_default_font(&self) -> bool {
        self.is_font_set
    }

    /// The default font path exactly as configured; may be empty or absent.
    pub fn font_path(&self) -> Option<&str> {
        self.font_path.as_deref()
    }

    /// The parsed default font, present whenever `has_default_font` is true.
    pub fn default_font_source(&self) -> Option<&FontSource> {
        self.default_source.as_ref()
    }

    /// The attribute looked up on nodes, styles and themes for a font path.
    /// `AttrId::INVALID` disables attribute lookups entirely.
    pub fn attr_id(&self) -> AttrId {
        self.attr_id
    }

    /// Whether any custom class was registered for typeface assignment.
    pub fn is_custom_view_typeface_support(&self) -> bool {
        self.custom_view_typeface_support
    }

    pub fn is_custom_view_has_typeface(&self, class: &ClassId) -> bool {
        self.typeface_classes.contains_key(class)
    }

    pub fn typeface_support(&self, class: &ClassId) -> Option<&TypefaceSupport> {
        self.typeface_classes.get(class)
    }

    /// The custom classes registered for typeface assignment.
    pub fn typeface_capable_classes(&self) -> impl Iterator<Item = &ClassId> {
        self.typeface_classes.keys()
    }

    /// Class -> default style attribute, built-in classes included.
    pub fn class_styles(&self) -> &HashMap<ClassId, AttrId> {
        &self.class_styles
    }

    /// The theme attribute naming the default style of `class`.
    pub fn style_attr_for(&self, class: &ClassId) -> Option<AttrId> {
        self.class_styles.get(class).copied()
    }

    pub fn font_mapper(&self) -> &FontMapper {
        &self.font_mapper
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfigBuilder::new().build()
    }
}

/// Accumulates configuration; [`build`](Self::build) consumes it.
#[derive(Debug)]
pub struct EngineConfigBuilder {
    font_path: Option<String>,
    attr_id: AttrId,
    custom_view_typeface_support: bool,
    typeface_classes: HashMap<ClassId, TypefaceSupport>,
    class_styles: HashMap<ClassId, AttrId>,
    font_mapper: FontMapper,
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self {
            font_path: None,
            attr_id: attrs::FONT_PATH,
            custom_view_typeface_support: false,
            typeface_classes: HashMap::new(),
            class_styles: HashMap::new(),
            font_mapper: FontMapper::identity(),
        }
    }
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font used when nothing else declares one, e.g.
    /// `"fonts/Roboto-Light.ttf"`. `None`, an empty or a whitespace-only path
    /// keeps the platform font. The path is still reported by `font_path` as
    /// given.
    pub fn with_default_font_path<'a>(mut self, path: impl Into<Option<&'a str>>) -> Self {
        self.font_path = path.into().map(str::to_string);
        self
    }

    /// Overrides the attribute consulted for font paths. Defaults to
    /// `attrs::FONT_PATH`; only change it to use your own attribute.
    pub fn with_font_attr_id(mut self, attr: AttrId) -> Self {
        self.attr_id = attr;
        self
    }

    /// Registers the theme attribute holding the default style of a class the
    /// engine does not know, e.g. a `MyTextField` styled by `textFieldStyle`.
    ///
    /// A missing or empty class, `AttrId::UNSET` and `AttrId::INVALID` are
    /// ignored.
    pub fn add_custom_style(
        mut self,
        class: impl Into<Option<ClassId>>,
        style_attr: AttrId,
    ) -> Self {
        match class.into() {
            Some(class) if !class.is_empty() && style_attr.is_valid() => {
                self.class_styles.insert(class, style_attr);
            }
            _ => log::debug!("Ignoring custom style registration with attr {}", style_attr),
        }
        self
    }

    /// Registers a non-text class whose widgets declare the typeface
    /// capability themselves.
    pub fn add_custom_view_with_set_typeface(self, class: impl Into<ClassId>) -> Self {
        self.register_typeface_class(class.into(), TypefaceSupport::Declared)
    }

    /// Registers a class whose widgets receive their typeface through `adapter`.
    pub fn add_custom_view_with_adapter(
        self,
        class: impl Into<ClassId>,
        adapter: TypefaceAdapter,
    ) -> Self {
        self.register_typeface_class(class.into(), TypefaceSupport::Adapter(adapter))
    }

    pub fn with_font_mapper(mut self, mapper: FontMapper) -> Self {
        self.font_mapper = mapper;
        self
    }

    fn register_typeface_class(mut self, class: ClassId, support: TypefaceSupport) -> Self {
        if class.is_empty() {
            log::debug!("Ignoring typeface registration for an empty class name");
            return self;
        }
        self.custom_view_typeface_support = true;
        self.typeface_classes.insert(class, support);
        self
    }

    /// Freezes the configuration.
    pub fn build(self) -> EngineConfig {
        let default_source = self.font_path.as_deref().and_then(FontSource::parse);

        let mut class_styles: HashMap<ClassId, AttrId> = TextKind::ALL
            .iter()
            .map(|kind| (kind.class_id(), kind.default_style_attr()))
            .collect();
        class_styles.extend(self.class_styles);

        EngineConfig {
            is_font_set: default_source.is_some(),
            font_path: self.font_path,
            default_source,
            attr_id: self.attr_id,
            custom_view_typeface_support: self.custom_view_typeface_support,
            typeface_classes: self.typeface_classes,
            class_styles,
            font_mapper: self.font_mapper,
        }
    }
}

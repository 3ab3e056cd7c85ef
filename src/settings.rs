//! Declarative engine settings read from JSON.
//!
//! ```json
//! {
//!   "defaultFont": "fonts/Roboto-Regular.ttf",
//!   "customStyles": [{ "class": "MyTextField", "attr": 2130837507 }],
//!   "typefaceClasses": ["Gauge"],
//!   "fontSubstitutions": { "fonts/Old.ttf": "fonts/New.ttf" },
//!   "assetRoot": "assets"
//! }
//! ```
//!
//! A relative `assetRoot` is taken relative to the settings file when read
//! with [`EngineSettings::from_path`].

use crate::error::SettingsError;
use fontcast_core::{EngineConfig, EngineConfigBuilder, FontEngine, FontMapper};
use fontcast_resource::AssetFontLoader;
use fontcast_types::{AttrId, ClassId, FontSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A theme attribute holding the default style of a custom class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomStyle {
    pub class: ClassId,
    pub attr: AttrId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    pub default_font: Option<String>,
    /// Overrides `attrs::FONT_PATH`.
    pub font_attr: Option<AttrId>,
    pub custom_styles: Vec<CustomStyle>,
    /// Custom classes whose widgets declare the typeface capability.
    pub typeface_classes: Vec<ClassId>,
    /// Declared font name to substituted font name.
    pub font_substitutions: BTreeMap<String, String>,
    pub asset_root: Option<PathBuf>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl EngineSettings {
    /// Unusable `customStyles` entries are dropped when the builder is made,
    /// like any other ignored registration. A reserved `fontAttr` is an
    /// error instead: it would silently switch off every node and theme
    /// lookup.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or an unusable `fontAttr`.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not hold valid settings.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        log::debug!("Reading engine settings from {}", path.display());
        let json = fs::read_to_string(path)?;
        let mut settings = Self::from_json_str(&json)?;
        settings.base_dir = path.parent().map(Path::to_path_buf);
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if let Some(attr) = self.font_attr.filter(|attr| !attr.is_valid()) {
            return Err(SettingsError::InvalidAttr {
                field: "fontAttr",
                value: attr.raw(),
            });
        }
        for style in self.custom_styles.iter().filter(|s| !s.attr.is_valid()) {
            log::warn!(
                "Dropping custom style for '{}': attribute id {} is reserved",
                style.class,
                style.attr
            );
        }
        Ok(())
    }

    /// The asset directory fonts are loaded from, `"."` when unset.
    pub fn resolved_asset_root(&self) -> PathBuf {
        let root = self.asset_root.clone().unwrap_or_else(|| PathBuf::from("."));
        match &self.base_dir {
            Some(base) if root.is_relative() => base.join(root),
            _ => root,
        }
    }

    /// A builder preloaded with these settings. Adapter registrations and
    /// custom mappers can still be added before `build`.
    pub fn into_builder(self) -> EngineConfigBuilder {
        let mut builder =
            EngineConfig::builder().with_default_font_path(self.default_font.as_deref());
        if let Some(attr) = self.font_attr {
            builder = builder.with_font_attr_id(attr);
        }
        for style in self.custom_styles {
            builder = builder.add_custom_style(style.class, style.attr);
        }
        for class in self.typeface_classes {
            builder = builder.add_custom_view_with_set_typeface(class);
        }
        if !self.font_substitutions.is_empty() {
            builder = builder.with_font_mapper(FontMapper::from_table(self.font_substitutions));
        }
        builder
    }

    pub fn asset_loader(&self) -> AssetFontLoader {
        AssetFontLoader::new(self.resolved_asset_root())
    }

    /// The configured engine over an asset loader.
    pub fn build_engine(self) -> FontEngine {
        let loader = Arc::new(self.asset_loader());
        FontEngine::new(self.into_builder().build(), loader)
    }

    /// Every font these settings can make the engine load: the default font
    /// and each substitution target, after mapping, without duplicates.
    pub fn referenced_fonts(&self) -> Vec<FontSource> {
        let mapper = FontMapper::from_table(self.font_substitutions.clone());
        let mut fonts: Vec<FontSource> = Vec::new();
        let declared = self
            .default_font
            .iter()
            .map(|font| mapper.map(font).into_owned())
            .chain(self.font_substitutions.values().cloned());
        for name in declared {
            if let Some(source) = FontSource::parse(&name)
                && !fonts.contains(&source)
            {
                fonts.push(source);
            }
        }
        fonts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcast_types::attrs;

    #[test]
    fn test_empty_settings() {
        let settings = EngineSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, EngineSettings::default());

        let config = settings.into_builder().build();
        assert!(!config.has_default_font());
        assert_eq!(config.attr_id(), attrs::FONT_PATH);
        assert!(!config.is_custom_view_typeface_support());
    }

    #[test]
    fn test_full_settings_into_config() {
        let json = r#"{
            "defaultFont": "fonts/Roboto.ttf",
            "fontAttr": 2130903042,
            "customStyles": [{ "class": "MyTextField", "attr": 2130837507 }],
            "typefaceClasses": ["Gauge"],
            "fontSubstitutions": { "fonts/Roboto.ttf": "fonts/Inter.ttf" }
        }"#;
        let config = EngineSettings::from_json_str(json).unwrap().into_builder().build();

        assert_eq!(config.font_path(), Some("fonts/Roboto.ttf"));
        assert_eq!(config.attr_id(), AttrId::new(2130903042));
        assert_eq!(
            config.style_attr_for(&ClassId::new("MyTextField")),
            Some(AttrId::new(2130837507))
        );
        assert!(config.is_custom_view_has_typeface(&ClassId::new("Gauge")));
        assert_eq!(config.font_mapper().map("fonts/Roboto.ttf"), "fonts/Inter.ttf");
    }

    #[test]
    fn test_rejects_reserved_font_attr() {
        let err = EngineSettings::from_json_str(r#"{ "fontAttr": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidAttr { field: "fontAttr", value: 0 }));
    }

    #[test]
    fn test_reserved_custom_style_attrs_are_dropped() {
        let settings = EngineSettings::from_json_str(
            r#"{
                "defaultFont": "fonts/A.ttf",
                "customStyles": [
                    { "class": "X", "attr": 0 },
                    { "class": "Y", "attr": -1 },
                    { "class": "Z", "attr": 2130837507 }
                ]
            }"#,
        )
        .unwrap();
        let config = settings.into_builder().build();

        assert!(config.has_default_font());
        assert_eq!(config.style_attr_for(&ClassId::new("X")), None);
        assert_eq!(config.style_attr_for(&ClassId::new("Y")), None);
        assert_eq!(
            config.style_attr_for(&ClassId::new("Z")),
            Some(AttrId::new(2130837507))
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineSettings::from_json_str("{ defaultFont: ").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_asset_root_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fontcast.json");
        fs::write(&path, r#"{ "assetRoot": "assets" }"#).unwrap();

        let settings = EngineSettings::from_path(&path).unwrap();
        assert_eq!(settings.resolved_asset_root(), dir.path().join("assets"));
        assert_eq!(settings.asset_loader().asset_root(), dir.path().join("assets"));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineSettings::from_path("/nonexistent/fontcast.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_referenced_fonts_are_mapped_and_deduplicated() {
        let settings = EngineSettings::from_json_str(
            r#"{
                "defaultFont": "./fonts/A.ttf",
                "fontSubstitutions": { "fonts/A.ttf": "fonts/B.ttf", "fonts/C.ttf": "fonts/B.ttf" }
            }"#,
        )
        .unwrap();
        assert_eq!(
            settings.referenced_fonts(),
            vec![FontSource::parse("fonts/B.ttf").unwrap()]
        );
    }
}

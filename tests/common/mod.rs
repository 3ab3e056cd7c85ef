#![allow(dead_code)]

use fontcast::{
    ApplyError, AttributeSet, ClassId, Component, ComponentHook, ComponentNode, FontError,
    FontLoader, FontSource, InMemoryFontLoader, InMemoryTheme, LoadedFont, SharedFontData,
    TextKind, ThemeContext, TypefaceTarget, attrs,
};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn src(path: &str) -> FontSource {
    FontSource::parse(path).expect("test font path")
}

/// Bytes that pass the sfnt header check without a real font behind them.
pub fn fake_font() -> Vec<u8> {
    b"\x00\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00".to_vec()
}

/// An in-memory loader that counts how often it is asked.
#[derive(Debug, Default)]
pub struct CountingLoader {
    pub fonts: InMemoryFontLoader,
    calls: AtomicUsize,
    pub delay: Option<Duration>,
}

impl CountingLoader {
    pub fn with_fonts<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        let loader = Self::default();
        for path in paths {
            loader.fonts.add(src(path), fake_font()).expect("add font");
        }
        loader
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FontLoader for CountingLoader {
    fn load_font(&self, source: &FontSource) -> Result<SharedFontData, FontError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.fonts.load_font(source)
    }

    fn exists(&self, source: &FontSource) -> bool {
        self.fonts.exists(source)
    }

    fn name(&self) -> &'static str {
        "CountingLoader"
    }
}

/// A custom widget that declares the typeface capability.
#[derive(Debug, Default)]
pub struct Gauge {
    pub font: Option<LoadedFont>,
}

impl TypefaceTarget for Gauge {
    fn set_typeface(&mut self, font: LoadedFont) {
        self.font = Some(font);
    }

    fn typeface(&self) -> Option<&LoadedFont> {
        self.font.as_ref()
    }
}

impl Component for Gauge {
    fn class_id(&self) -> ClassId {
        ClassId::from_static("Gauge")
    }

    fn typeface_target(&mut self) -> Option<&mut dyn TypefaceTarget> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A custom widget with a font setter but no declared capability.
#[derive(Debug, Default)]
pub struct Sparkline {
    pub font: Option<LoadedFont>,
}

impl Sparkline {
    pub fn set_label_font(&mut self, font: LoadedFont) {
        self.font = Some(font);
    }
}

impl Component for Sparkline {
    fn class_id(&self) -> ClassId {
        ClassId::from_static("Sparkline")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub fn text(kind: TextKind, label: &str) -> ComponentNode {
    ComponentNode::text(kind, label)
}

pub fn text_with_font(label: &str, font: &str) -> ComponentNode {
    ComponentNode::text(TextKind::Text, label)
        .with_attrs(AttributeSet::new().with_value(attrs::FONT_PATH, font))
}

/// A screen with a heading, a form row and a footer: 6 text nodes inside
/// 3 containers.
pub fn sample_screen() -> ComponentNode {
    ComponentNode::container("Column").with_children([
        text(TextKind::Text, "Title").with_id("title"),
        ComponentNode::container("Row").with_children([
            text(TextKind::TextField, "name").with_id("name"),
            text(TextKind::Checkbox, "remember"),
            text(TextKind::Button, "Submit").with_id("submit"),
        ]),
        ComponentNode::container("Row").with_children([
            text(TextKind::RadioButton, "a"),
            text(TextKind::Switch, "b"),
        ]),
    ])
}

pub fn empty_theme() -> InMemoryTheme {
    InMemoryTheme::new()
}

/// Builds `blueprint` the way a construction pipeline would: each node is
/// created, handed to the hook, then attached to its parent.
pub fn inflate(
    mut blueprint: ComponentNode,
    hook: &dyn ComponentHook,
    theme: &dyn ThemeContext,
    errors: &mut Vec<ApplyError>,
) -> ComponentNode {
    let children = blueprint.take_children();
    if let Err(e) = hook.on_component_created(&mut blueprint, theme) {
        errors.push(e);
    }
    for child in children {
        let child = inflate(child, hook, theme, errors);
        blueprint.push_child(child);
    }
    blueprint
}

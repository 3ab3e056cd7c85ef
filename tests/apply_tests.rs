mod common;

use common::{
    CountingLoader, Gauge, Sparkline, TestResult, empty_theme, init_logging, sample_screen, src,
    text, text_with_font,
};
use fontcast::{
    ApplyError, AttributeSet, ComponentNode, ConfigurationError, EngineConfig, FontEngine,
    FontError, FontMapper, FontResolver, InMemoryTheme, LoadedFont, NodeOutcome, ResolvedFrom,
    TextKind, TypefaceAdapter, attrs,
};
use std::sync::Arc;

fn engine(config: EngineConfig, loader: &Arc<CountingLoader>) -> FontEngine {
    FontEngine::new(config, loader.clone())
}

fn fonts_of(node: &ComponentNode, out: &mut Vec<Option<LoadedFont>>) {
    let font = node
        .text_typeface()
        .cloned()
        .or_else(|| node.widget_as::<Gauge>().and_then(|g| g.font.clone()));
    out.push(font);
    for child in node.children() {
        fonts_of(child, out);
    }
}

#[test]
fn test_default_font_reaches_every_text_node() -> TestResult {
    init_logging();
    let loader = Arc::new(CountingLoader::with_fonts(["fonts/Default.ttf"]));
    let engine = engine(
        EngineConfig::builder()
            .with_default_font_path("fonts/Default.ttf")
            .build(),
        &loader,
    );

    let mut screen = sample_screen();
    let report = engine.apply(&mut screen, &empty_theme());

    assert!(report.is_clean());
    assert_eq!(report.visited, 9);
    assert_eq!(report.eligible, 6);
    assert_eq!(report.styled, 6);
    assert_eq!(loader.calls(), 1);

    let submit = screen.find("submit").ok_or("missing submit")?;
    assert_eq!(submit.text_typeface().map(|f| f.source().clone()), Some(src("fonts/Default.ttf")));
    Ok(())
}

#[test]
fn test_node_override_beats_default() -> TestResult {
    init_logging();
    let loader = Arc::new(CountingLoader::with_fonts(["fonts/Default.ttf", "fonts/Title.ttf"]));
    let engine = engine(
        EngineConfig::builder()
            .with_default_font_path("fonts/Default.ttf")
            .build(),
        &loader,
    );

    let mut root = ComponentNode::container("Column").with_children([
        text_with_font("Heading", "fonts/Title.ttf").with_id("heading"),
        text(TextKind::Text, "body").with_id("body"),
    ]);
    let report = engine.apply(&mut root, &empty_theme());
    assert!(report.is_clean());

    let heading = root.find("heading").ok_or("missing heading")?;
    let body = root.find("body").ok_or("missing body")?;
    assert_eq!(heading.text_typeface().map(|f| f.source().clone()), Some(src("fonts/Title.ttf")));
    assert_eq!(body.text_typeface().map(|f| f.source().clone()), Some(src("fonts/Default.ttf")));
    Ok(())
}

#[test]
fn test_theme_style_for_class() {
    init_logging();
    let loader = Arc::new(CountingLoader::with_fonts(["fonts/Default.ttf", "fonts/Button.ttf"]));
    let engine = engine(
        EngineConfig::builder()
            .with_default_font_path("fonts/Default.ttf")
            .build(),
        &loader,
    );
    let theme = InMemoryTheme::new()
        .with_attribute(attrs::BUTTON_STYLE, "Widget.Button.Primary")
        .with_style_parent("Widget.Button.Primary", "Widget.Button")
        .with_style_value("Widget.Button", attrs::FONT_PATH, "fonts/Button.ttf");

    let button = text(TextKind::Button, "Go");
    assert_eq!(engine.resolve(&button, &theme), Some(src("fonts/Button.ttf")));

    let label = text(TextKind::Text, "Label");
    assert_eq!(engine.resolve(&label, &theme), Some(src("fonts/Default.ttf")));

    let origin = FontResolver::new(engine.config())
        .resolve_with_origin(&button, &theme)
        .map(|r| r.origin);
    assert_eq!(origin, Some(ResolvedFrom::ThemeStyle));
}

#[test]
fn test_mapper_substitutes_resolved_font() -> TestResult {
    init_logging();
    let loader = Arc::new(CountingLoader::with_fonts(["fonts/B.ttf"]));
    let engine = engine(
        EngineConfig::builder()
            .with_default_font_path("fonts/A.ttf")
            .with_font_mapper(FontMapper::from_table([("fonts/A.ttf", "fonts/B.ttf")]))
            .build(),
        &loader,
    );

    let mut root = ComponentNode::container("Column").with_children([
        text(TextKind::Text, "default"),
        text_with_font("declared", "fonts/A.ttf"),
    ]);
    let report = engine.apply(&mut root, &empty_theme());

    assert!(report.is_clean());
    assert_eq!(report.styled, 2);
    for child in root.children() {
        let font = child.text_typeface().ok_or("unstyled child")?;
        assert_eq!(font.source(), &src("fonts/B.ttf"));
    }
    Ok(())
}

#[test]
fn test_one_broken_font_among_ten() {
    init_logging();
    let loader = Arc::new(CountingLoader::with_fonts(["fonts/Good.ttf"]));
    let engine = engine(EngineConfig::builder().build(), &loader);

    let mut nodes: Vec<ComponentNode> = (0..9)
        .map(|i| text_with_font(&format!("ok {}", i), "fonts/Good.ttf"))
        .collect();
    nodes.insert(4, text_with_font("broken", "fonts/Broken.ttf").with_id("broken"));
    let mut root = ComponentNode::container("Column").with_children(nodes);

    let report = engine.apply(&mut root, &empty_theme());

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.font_load_errors().count(), 1);
    assert_eq!(report.styled, 9);

    let err = &report.errors[0];
    assert_eq!(err.node().path, vec![4]);
    assert_eq!(err.node().id.as_deref(), Some("broken"));
    assert!(matches!(
        err,
        ApplyError::FontLoad { source: FontError::NotFound(_), .. }
    ));

    for (index, child) in root.children().iter().enumerate() {
        assert_eq!(child.text_typeface().is_some(), index != 4, "child {}", index);
    }
}

#[test]
fn test_registered_class_without_capability() {
    init_logging();
    let loader = Arc::new(CountingLoader::with_fonts(["fonts/Default.ttf"]));
    let engine = engine(
        EngineConfig::builder()
            .with_default_font_path("fonts/Default.ttf")
            .add_custom_view_with_set_typeface("Gauge")
            .add_custom_view_with_set_typeface("Sparkline")
            .build(),
        &loader,
    );

    let mut root = ComponentNode::container("Column").with_children([
        text(TextKind::Text, "before"),
        ComponentNode::new(Sparkline::default()).with_id("spark"),
        ComponentNode::new(Gauge::default()),
        text(TextKind::Button, "after"),
    ]);
    let report = engine.apply(&mut root, &empty_theme());

    assert_eq!(report.errors.len(), 1);
    let err = &report.errors[0];
    assert!(err.is_configuration());
    assert_eq!(err.node().id.as_deref(), Some("spark"));
    assert!(matches!(
        err,
        ApplyError::Configuration {
            source: ConfigurationError::MissingCapability { .. },
            ..
        }
    ));

    assert_eq!(report.styled, 3);
    assert!(root.children()[0].text_typeface().is_some());
    assert!(root.children()[1].widget_as::<Sparkline>().is_some_and(|s| s.font.is_none()));
    assert!(root.children()[2].widget_as::<Gauge>().is_some_and(|g| g.font.is_some()));
    assert!(root.children()[3].text_typeface().is_some());
}

#[test]
fn test_adapter_gives_custom_widget_a_font() {
    init_logging();
    let loader = Arc::new(CountingLoader::with_fonts(["fonts/Default.ttf"]));
    let engine = engine(
        EngineConfig::builder()
            .with_default_font_path("fonts/Default.ttf")
            .add_custom_view_with_adapter(
                "Sparkline",
                TypefaceAdapter::new(|s: &mut Sparkline, font| s.set_label_font(font)),
            )
            .build(),
        &loader,
    );

    let mut root =
        ComponentNode::container("Row").with_child(ComponentNode::new(Sparkline::default()));
    let report = engine.apply(&mut root, &empty_theme());

    assert!(report.is_clean());
    assert!(root.children()[0].widget_as::<Sparkline>().is_some_and(|s| s.font.is_some()));
}

#[test]
fn test_unregistered_custom_widget_is_ignored() {
    init_logging();
    let loader = Arc::new(CountingLoader::with_fonts(["fonts/Default.ttf"]));
    let engine = engine(
        EngineConfig::builder()
            .with_default_font_path("fonts/Default.ttf")
            .build(),
        &loader,
    );

    let mut gauge = ComponentNode::new(Gauge::default());
    let report = engine.apply(&mut gauge, &empty_theme());
    assert!(report.is_clean());
    assert_eq!(report.eligible, 0);
    assert!(gauge.widget_as::<Gauge>().is_some_and(|g| g.font.is_none()));
}

#[test]
fn test_applying_twice_changes_nothing() {
    init_logging();
    let loader = Arc::new(CountingLoader::with_fonts(["fonts/Default.ttf", "fonts/Title.ttf"]));
    let engine = engine(
        EngineConfig::builder()
            .with_default_font_path("fonts/Default.ttf")
            .add_custom_view_with_set_typeface("Gauge")
            .build(),
        &loader,
    );

    let mut root = sample_screen()
        .with_child(text_with_font("title", "fonts/Title.ttf"))
        .with_child(ComponentNode::new(Gauge::default()));
    let theme = empty_theme();

    let first = engine.apply(&mut root, &theme);
    let mut before = Vec::new();
    fonts_of(&root, &mut before);
    let calls = loader.calls();

    let second = engine.apply(&mut root, &theme);
    let mut after = Vec::new();
    fonts_of(&root, &mut after);

    assert!(first.is_clean());
    assert!(second.is_clean());
    assert_eq!(first.styled, 8);
    assert_eq!(second.styled, 0);
    assert_eq!(second.already_styled, 8);
    assert_eq!(before, after);
    assert_eq!(loader.calls(), calls);
}

#[test]
fn test_no_font_configured_leaves_tree_untouched() {
    init_logging();
    let loader = Arc::new(CountingLoader::default());
    let engine = engine(EngineConfig::builder().build(), &loader);

    let mut screen = sample_screen();
    let report = engine.apply(&mut screen, &empty_theme());

    assert!(report.is_clean());
    assert_eq!(report.untouched, 6);
    assert_eq!(loader.calls(), 0);
}

#[test]
fn test_node_style_attribute() -> TestResult {
    init_logging();
    let loader = Arc::new(CountingLoader::with_fonts(["fonts/Headline.ttf"]));
    let engine = engine(EngineConfig::builder().build(), &loader);
    let theme =
        InMemoryTheme::new().with_style_value("Headline", attrs::FONT_PATH, "fonts/Headline.ttf");

    let mut node =
        text(TextKind::Text, "Big").with_attrs(AttributeSet::new().with_style("Headline"));
    let outcome = engine.applicator().apply_node(&mut node, &theme)?;

    assert_eq!(outcome, NodeOutcome::Styled);
    assert_eq!(node.text_typeface().map(|f| f.source().clone()), Some(src("fonts/Headline.ttf")));
    Ok(())
}

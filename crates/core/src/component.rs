//! The component tree the engine styles.
//!
//! A construction pipeline produces a tree of [`ComponentNode`]s. Each node
//! owns its widget (anything implementing [`Component`]), the attributes it
//! was declared with, and its children. Whether a widget can take a font is a
//! capability, not a type: built-in text widgets expose it through
//! [`Component::as_text_mut`], custom widgets through
//! [`Component::typeface_target`] or through a [`TypefaceAdapter`] supplied
//! when the engine is configured.

use fontcast_traits::LoadedFont;
use fontcast_types::{AttrId, ClassId, attrs, classes};
use std::any::Any;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// The capability of having a font assigned.
pub trait TypefaceTarget {
    /// Whether the widget currently accepts a typeface.
    fn supports_typeface_assignment(&self) -> bool {
        true
    }

    fn set_typeface(&mut self, font: LoadedFont);

    /// The font assigned so far, if the widget tracks it.
    fn typeface(&self) -> Option<&LoadedFont> {
        None
    }
}

/// A widget instance in a component tree.
pub trait Component: Any + Debug {
    fn class_id(&self) -> ClassId;

    /// Built-in text widgets return themselves here.
    fn as_text(&self) -> Option<&Text> {
        None
    }

    fn as_text_mut(&mut self) -> Option<&mut Text> {
        None
    }

    /// The declared typeface capability of a custom widget.
    fn typeface_target(&mut self) -> Option<&mut dyn TypefaceTarget> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The built-in text-capable widget kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    Text,
    Button,
    TextField,
    Checkbox,
    RadioButton,
    Switch,
}

impl TextKind {
    pub const ALL: [TextKind; 6] = [
        TextKind::Text,
        TextKind::Button,
        TextKind::TextField,
        TextKind::Checkbox,
        TextKind::RadioButton,
        TextKind::Switch,
    ];

    pub fn class_id(self) -> ClassId {
        match self {
            TextKind::Text => classes::TEXT,
            TextKind::Button => classes::BUTTON,
            TextKind::TextField => classes::TEXT_FIELD,
            TextKind::Checkbox => classes::CHECKBOX,
            TextKind::RadioButton => classes::RADIO_BUTTON,
            TextKind::Switch => classes::SWITCH,
        }
    }

    /// The theme attribute naming this kind's default style.
    pub fn default_style_attr(self) -> AttrId {
        match self {
            TextKind::Text => attrs::TEXT_STYLE,
            TextKind::Button => attrs::BUTTON_STYLE,
            TextKind::TextField => attrs::TEXT_FIELD_STYLE,
            TextKind::Checkbox => attrs::CHECKBOX_STYLE,
            TextKind::RadioButton => attrs::RADIO_BUTTON_STYLE,
            TextKind::Switch => attrs::SWITCH_STYLE,
        }
    }
}

/// A built-in text widget. Always supports typeface assignment.
#[derive(Debug, Clone)]
pub struct Text {
    kind: TextKind,
    pub text: String,
    typeface: Option<LoadedFont>,
}

impl Text {
    pub fn new(kind: TextKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            typeface: None,
        }
    }

    pub fn kind(&self) -> TextKind {
        self.kind
    }
}

impl TypefaceTarget for Text {
    fn set_typeface(&mut self, font: LoadedFont) {
        self.typeface = Some(font);
    }

    fn typeface(&self) -> Option<&LoadedFont> {
        self.typeface.as_ref()
    }
}

impl Component for Text {
    fn class_id(&self) -> ClassId {
        self.kind.class_id()
    }

    fn as_text(&self) -> Option<&Text> {
        Some(self)
    }

    fn as_text_mut(&mut self) -> Option<&mut Text> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A widget without text, e.g. a layout container or an image.
#[derive(Debug, Clone)]
pub struct Container {
    class: ClassId,
}

impl Container {
    pub fn new(class: impl Into<ClassId>) -> Self {
        Self {
            class: class.into(),
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new(classes::CONTAINER)
    }
}

impl Component for Container {
    fn class_id(&self) -> ClassId {
        self.class.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

type ProbeFn = fn(&dyn Any) -> bool;
type AssignFn = dyn Fn(&mut dyn Any, LoadedFont) -> bool + Send + Sync;

/// Gives a custom widget type the typeface capability from the outside.
///
/// Registered per class when the engine is configured, so third-party widgets
/// that know nothing about this crate can still be styled.
#[derive(Clone)]
pub struct TypefaceAdapter {
    target: &'static str,
    probe: ProbeFn,
    assign: Arc<AssignFn>,
}

impl TypefaceAdapter {
    /// Adapts widgets of concrete type `T` with the given setter.
    pub fn new<T: Any>(set: impl Fn(&mut T, LoadedFont) + Send + Sync + 'static) -> Self {
        Self {
            target: std::any::type_name::<T>(),
            probe: |widget: &dyn Any| widget.is::<T>(),
            assign: Arc::new(move |widget: &mut dyn Any, font: LoadedFont| {
                match widget.downcast_mut::<T>() {
                    Some(w) => {
                        set(w, font);
                        true
                    }
                    None => false,
                }
            }),
        }
    }

    /// Adapts a type that already implements [`TypefaceTarget`].
    pub fn for_target<T: TypefaceTarget + Any>() -> Self {
        Self::new(|w: &mut T, font| w.set_typeface(font))
    }

    /// Name of the concrete type this adapter accepts.
    pub fn target_type(&self) -> &'static str {
        self.target
    }

    /// Whether `widget` is of the adapted type.
    pub fn accepts(&self, widget: &dyn Any) -> bool {
        (self.probe)(widget)
    }

    /// Assigns `font`; false if `widget` is not of the adapted type.
    pub fn assign(&self, widget: &mut dyn Any, font: LoadedFont) -> bool {
        (self.assign)(widget, font)
    }
}

impl Debug for TypefaceAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypefaceAdapter")
            .field("target", &self.target)
            .finish()
    }
}

/// Attributes a node was declared with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    values: HashMap<AttrId, String>,
    style: Option<String>,
    text_appearance: Option<String>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, attr: AttrId, value: impl Into<String>) -> Self {
        self.values.insert(attr, value.into());
        self
    }

    /// The style the node references directly.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_text_appearance(mut self, style: impl Into<String>) -> Self {
        self.text_appearance = Some(style.into());
        self
    }

    pub fn value(&self, attr: AttrId) -> Option<&str> {
        self.values.get(&attr).map(String::as_str)
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn text_appearance(&self) -> Option<&str> {
        self.text_appearance.as_deref()
    }
}

/// One node of a constructed component tree.
#[derive(Debug)]
pub struct ComponentNode {
    id: Option<String>,
    attrs: AttributeSet,
    widget: Box<dyn Component>,
    children: Vec<ComponentNode>,
}

impl ComponentNode {
    pub fn new(widget: impl Component) -> Self {
        Self::from_boxed(Box::new(widget))
    }

    pub fn from_boxed(widget: Box<dyn Component>) -> Self {
        Self {
            id: None,
            attrs: AttributeSet::default(),
            widget,
            children: Vec::new(),
        }
    }

    /// Shorthand for a built-in text node.
    pub fn text(kind: TextKind, text: impl Into<String>) -> Self {
        Self::new(Text::new(kind, text))
    }

    /// Shorthand for a container node.
    pub fn container(class: impl Into<ClassId>) -> Self {
        Self::new(Container::new(class))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attrs(mut self, attrs: AttributeSet) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ComponentNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push_child(&mut self, child: ComponentNode) {
        self.children.push(child);
    }

    /// Detaches and returns all children, e.g. to re-attach them one by one.
    pub fn take_children(&mut self) -> Vec<ComponentNode> {
        std::mem::take(&mut self.children)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attrs(&self) -> &AttributeSet {
        &self.attrs
    }

    pub fn class_id(&self) -> ClassId {
        self.widget.class_id()
    }

    pub fn widget(&self) -> &dyn Component {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> &mut dyn Component {
        self.widget.as_mut()
    }

    /// Downcasts the widget to a concrete type.
    pub fn widget_as<T: Any>(&self) -> Option<&T> {
        self.widget.as_any().downcast_ref::<T>()
    }

    pub fn children(&self) -> &[ComponentNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [ComponentNode] {
        &mut self.children
    }

    /// The font currently assigned to a built-in text widget.
    pub fn text_typeface(&self) -> Option<&LoadedFont> {
        self.widget.as_text().and_then(|t| t.typeface())
    }

    /// Depth-first search by id, including this node.
    pub fn find(&self, id: &str) -> Option<&ComponentNode> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Number of nodes in this subtree, including this node.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(ComponentNode::subtree_len).sum::<usize>()
    }
}

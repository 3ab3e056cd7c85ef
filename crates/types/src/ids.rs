//! Newtype wrappers for component classes and theme attribute slots.
//!
//! These keep class names and attribute ids from being mixed up with plain
//! strings and integers at the configuration boundary.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identity of a component class, e.g. `Button` or `com.example.Gauge`.
///
/// Built-in classes are available as constants in [`classes`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(Cow<'static, str>);

impl ClassId {
    /// Creates a class id from a static name. Usable in constants.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a class id from any string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the class name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty name never identifies a class.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&'static str> for ClassId {
    fn from(s: &'static str) -> Self {
        Self::from_static(s)
    }
}

impl From<String> for ClassId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for ClassId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A theme attribute slot.
///
/// Two values are reserved: [`AttrId::UNSET`] (`0`), which configuration
/// treats as "nothing registered", and [`AttrId::INVALID`] (`-1`), the
/// sentinel for "no attribute configured".
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttrId(i32);

impl AttrId {
    pub const UNSET: AttrId = AttrId(0);
    pub const INVALID: AttrId = AttrId(-1);

    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// True for any id other than the two sentinels.
    pub const fn is_valid(self) -> bool {
        self.0 != Self::UNSET.0 && self.0 != Self::INVALID.0
    }
}

impl From<i32> for AttrId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for AttrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attr#{:#x}", self.0)
    }
}

/// Well-known attribute ids understood by the built-in theme.
pub mod attrs {
    use super::AttrId;

    /// The attribute a node, style or theme uses to declare a font path.
    pub const FONT_PATH: AttrId = AttrId::new(0x7f01_0001);

    pub const TEXT_STYLE: AttrId = AttrId::new(0x0101_0084);
    pub const BUTTON_STYLE: AttrId = AttrId::new(0x0101_0048);
    pub const TEXT_FIELD_STYLE: AttrId = AttrId::new(0x0101_006e);
    pub const CHECKBOX_STYLE: AttrId = AttrId::new(0x0101_006c);
    pub const RADIO_BUTTON_STYLE: AttrId = AttrId::new(0x0101_007e);
    pub const SWITCH_STYLE: AttrId = AttrId::new(0x0101_043f);
}

/// Class ids of the built-in components.
pub mod classes {
    use super::ClassId;

    pub const TEXT: ClassId = ClassId::from_static("Text");
    pub const BUTTON: ClassId = ClassId::from_static("Button");
    pub const TEXT_FIELD: ClassId = ClassId::from_static("TextField");
    pub const CHECKBOX: ClassId = ClassId::from_static("Checkbox");
    pub const RADIO_BUTTON: ClassId = ClassId::from_static("RadioButton");
    pub const SWITCH: ClassId = ClassId::from_static("Switch");
    pub const CONTAINER: ClassId = ClassId::from_static("Container");
}

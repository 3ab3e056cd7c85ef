pub mod font;
pub mod theme;

pub use font::{FontError, FontLoader, InMemoryFontLoader, LoadedFont, SharedFontData};
pub use theme::{InMemoryTheme, ThemeContext};

//! Icon primitive: maps icon names to terminal glyphs.

use serde::{Deserialize, Serialize};

pub const SEARCH: &str = "search";
pub const ARROW_RIGHT: &str = "arrow-right";
pub const ARROW_LEFT: &str = "arrow-left";

pub trait IconSet {
    /// Glyph text for `name`, or `None` if this set has no such icon.
    fn symbol(&self, name: &str) -> Option<&'static str>;
}

/// Plain Unicode symbols that render in any terminal font.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeIcons;

impl IconSet for UnicodeIcons {
    fn symbol(&self, name: &str) -> Option<&'static str> {
        match name {
            SEARCH => Some("⌕"),
            ARROW_RIGHT => Some("→"),
            ARROW_LEFT => Some("←"),
            _ => None,
        }
    }
}

/// Font Awesome code points as shipped by Nerd Fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NerdFontIcons;

impl IconSet for NerdFontIcons {
    fn symbol(&self, name: &str) -> Option<&'static str> {
        match name {
            SEARCH => Some("\u{f002}"),
            ARROW_RIGHT => Some("\u{f061}"),
            ARROW_LEFT => Some("\u{f060}"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconTheme {
    #[default]
    Unicode,
    NerdFont,
}

impl IconTheme {
    pub fn icon_set(self) -> &'static dyn IconSet {
        match self {
            Self::Unicode => &UnicodeIcons,
            Self::NerdFont => &NerdFontIcons,
        }
    }
}

/// Renders the named icon, logging unknown names.
pub fn render_icon(icons: &dyn IconSet, name: &str) -> Option<&'static str> {
    let symbol = icons.symbol(name);
    if symbol.is_none() {
        tracing::debug!("No glyph for icon '{}'", name);
    }
    symbol
}

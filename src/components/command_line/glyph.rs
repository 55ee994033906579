use crate::components::icon::{ARROW_LEFT, ARROW_RIGHT, SEARCH};

/// An icon placed in the output, identified by a key that stays stable
/// across renders with the same leading character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub key: String,
    pub icon: &'static str,
    /// Arrow glyphs render dimmed with a trailing margin.
    pub arrow: bool,
}

impl Glyph {
    fn icon(first_char: &str, icon: &'static str) -> Self {
        Self {
            key: format!("{}-{}", first_char, icon),
            icon,
            arrow: false,
        }
    }

    fn arrow(first_char: &str, icon: &'static str) -> Self {
        Self {
            key: format!("{}-{}", first_char, icon),
            icon,
            arrow: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadingGlyph {
    Text(String),
    Icons(Vec<Glyph>),
}

/// `/` and `?` become a search icon plus a direction arrow when icons are
/// enabled. Everything else, including multi-character values, is literal.
pub fn render_leading_glyph(first_char: &str, show_icons: bool) -> LeadingGlyph {
    if !show_icons {
        return LeadingGlyph::Text(first_char.to_string());
    }

    match first_char {
        "/" => LeadingGlyph::Icons(vec![
            Glyph::icon(first_char, SEARCH),
            Glyph::arrow(first_char, ARROW_RIGHT),
        ]),
        "?" => LeadingGlyph::Icons(vec![
            Glyph::icon(first_char, SEARCH),
            Glyph::arrow(first_char, ARROW_LEFT),
        ]),
        _ => LeadingGlyph::Text(first_char.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn icon_names(glyph: &LeadingGlyph) -> Vec<&'static str> {
        match glyph {
            LeadingGlyph::Icons(glyphs) => glyphs.iter().map(|g| g.icon).collect(),
            LeadingGlyph::Text(text) => panic!("expected icons, got text {:?}", text),
        }
    }

    #[rstest]
    #[case("")]
    #[case("/")]
    #[case("?")]
    #[case(":")]
    #[case("=")]
    fn test_icons_disabled_is_literal(#[case] first_char: &str) {
        assert_eq!(
            render_leading_glyph(first_char, false),
            LeadingGlyph::Text(first_char.to_string())
        );
    }

    #[test]
    fn test_forward_search() {
        let glyph = render_leading_glyph("/", true);
        assert_eq!(icon_names(&glyph), vec![SEARCH, ARROW_RIGHT]);
    }

    #[test]
    fn test_backward_search() {
        let glyph = render_leading_glyph("?", true);
        assert_eq!(icon_names(&glyph), vec![SEARCH, ARROW_LEFT]);
    }

    #[rstest]
    #[case("")]
    #[case(":")]
    #[case("//")]
    #[case("?/")]
    fn test_other_characters_fall_through(#[case] first_char: &str) {
        let glyph = render_leading_glyph(first_char, true);
        assert_eq!(glyph, LeadingGlyph::Text(first_char.to_string()));
    }

    #[test]
    fn test_glyph_keys_are_stable() {
        let LeadingGlyph::Icons(first) = render_leading_glyph("?", true) else {
            panic!("expected icons");
        };
        let LeadingGlyph::Icons(second) = render_leading_glyph("?", true) else {
            panic!("expected icons");
        };
        assert_eq!(first, second);
        let keys: Vec<_> = first.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["?-search", "?-arrow-left"]);
        assert!(!first[0].arrow);
        assert!(first[1].arrow);
    }

    #[test]
    fn test_empty_leading_glyph() {
        assert_eq!(render_leading_glyph("", true), LeadingGlyph::Text(String::new()));
        assert_eq!(render_leading_glyph("", false), LeadingGlyph::Text(String::new()));
    }
}

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Unit in which the cursor position counts into the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segmentation {
    /// Unicode scalar values.
    #[default]
    Chars,
    /// Extended grapheme clusters.
    Graphemes,
}

impl Segmentation {
    pub fn unit_count(self, text: &str) -> usize {
        match self {
            Self::Chars => text.chars().count(),
            Self::Graphemes => text.graphemes(true).count(),
        }
    }

    /// Byte offset of the unit at `position`, or `text.len()` past the end.
    pub fn byte_offset(self, text: &str, position: usize) -> usize {
        let nth = match self {
            Self::Chars => text.char_indices().nth(position).map(|(idx, _)| idx),
            Self::Graphemes => text.grapheme_indices(true).nth(position).map(|(idx, _)| idx),
        };
        nth.unwrap_or(text.len())
    }
}

/// Content split around the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments {
    pub before: String,
    pub after: String,
}

/// Splits `content` at `position` units. Empty content has no segments.
///
/// Positions past the end are clamped.
pub fn split_at_cursor(content: &str, position: usize, segmentation: Segmentation) -> Option<Segments> {
    if content.is_empty() {
        return None;
    }

    let split = segmentation.byte_offset(content, position);
    let (before, after) = content.split_at(split);
    Some(Segments {
        before: before.to_string(),
        after: after.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_empty_content_has_no_segments() {
        assert_eq!(split_at_cursor("", 0, Segmentation::Chars), None);
        assert_eq!(split_at_cursor("", 3, Segmentation::Graphemes), None);
    }

    #[test]
    fn test_split_mid_content() {
        let segments = split_at_cursor("edit foo.txt", 5, Segmentation::Chars).unwrap();
        assert_eq!(segments.before, "edit ");
        assert_eq!(segments.after, "foo.txt");
    }

    #[rstest]
    #[case("w")]
    #[case("s/a/b/g")]
    #[case("héllo wörld")]
    #[case("日本語")]
    #[case("a🦀b")]
    #[case("e\u{301}x\u{1F1EF}\u{1F1F5}")]
    fn test_split_preserves_content_and_position(
        #[case] content: &str,
        #[values(Segmentation::Chars, Segmentation::Graphemes)] segmentation: Segmentation,
    ) {
        for position in 0..=segmentation.unit_count(content) {
            let segments = split_at_cursor(content, position, segmentation).unwrap();
            assert_eq!(format!("{}{}", segments.before, segments.after), content);
            assert_eq!(
                segmentation.unit_count(&segments.before),
                position,
                "position {} in {:?}",
                position,
                content
            );
        }
    }

    #[test]
    fn test_position_past_end_is_clamped() {
        let segments = split_at_cursor("abc", 10, Segmentation::Chars).unwrap();
        assert_eq!(segments.before, "abc");
        assert_eq!(segments.after, "");
    }

    #[test]
    fn test_grapheme_segmentation_keeps_clusters_whole() {
        // "e" + combining acute accent is one grapheme but two scalars.
        let content = "e\u{301}x";
        assert_eq!(Segmentation::Chars.unit_count(content), 3);
        assert_eq!(Segmentation::Graphemes.unit_count(content), 2);

        let segments = split_at_cursor(content, 1, Segmentation::Graphemes).unwrap();
        assert_eq!(segments.before, "e\u{301}");
        assert_eq!(segments.after, "x");

        let segments = split_at_cursor(content, 1, Segmentation::Chars).unwrap();
        assert_eq!(segments.before, "e");
        assert_eq!(segments.after, "\u{301}x");
    }
}

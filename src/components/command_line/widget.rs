use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph, Widget},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::glyph::LeadingGlyph;
use super::view::{Node, RenderOutput};
use crate::components::icon::{render_icon, IconSet};
use crate::config::Theme;

const CURSOR_MARKER: &str = "▏";
const ARROW_MARGIN: &str = " ";

/// Height of the overlay box: one content row plus padding.
pub const OVERLAY_HEIGHT: u16 = 3;

/// Centered box near the top of `area`, `width_percent` wide and at most
/// `max_width` columns.
pub fn overlay_area(area: Rect, width_percent: u16, max_width: u16) -> Rect {
    let width = (area.width.saturating_mul(width_percent.min(100)) / 100)
        .min(max_width)
        .min(area.width);
    let height = OVERLAY_HEIGHT.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + area.height.saturating_sub(height).min(1);
    Rect::new(x, y, width, height)
}

pub struct CommandLineWidget<'a> {
    output: &'a RenderOutput,
    theme: &'a Theme,
    icons: &'a dyn IconSet,
}

impl<'a> CommandLineWidget<'a> {
    pub fn new(output: &'a RenderOutput, theme: &'a Theme, icons: &'a dyn IconSet) -> Self {
        Self {
            output,
            theme,
            icons,
        }
    }

    fn block(&self) -> Block<'static> {
        Block::default()
            .style(self.theme.overlay_style())
            .padding(Padding::uniform(1))
    }

    fn spans(&self) -> Vec<Span<'a>> {
        let output: &'a RenderOutput = self.output;
        let mut spans = Vec::new();
        for node in output.nodes() {
            match node {
                Node::Glyph(glyph) => {
                    let Some(symbol) = render_icon(self.icons, glyph.icon) else {
                        continue;
                    };
                    if glyph.arrow {
                        spans.push(Span::styled(symbol, self.theme.arrow_style()));
                        spans.push(Span::raw(ARROW_MARGIN));
                    } else {
                        spans.push(Span::styled(symbol, self.theme.icon_style()));
                    }
                }
                Node::Text(text) => spans.push(Span::raw(text)),
                Node::Cursor => spans.push(Span::styled(CURSOR_MARKER, self.theme.cursor_style())),
            }
        }
        spans
    }

    /// Display column of the cursor marker relative to the start of the line.
    pub fn cursor_column(&self) -> u16 {
        let leading = match &self.output.leading {
            LeadingGlyph::Text(text) => text.width(),
            LeadingGlyph::Icons(glyphs) => glyphs
                .iter()
                .filter_map(|glyph| {
                    let symbol = self.icons.symbol(glyph.icon)?;
                    Some(symbol.width() + if glyph.arrow { ARROW_MARGIN.width() } else { 0 })
                })
                .sum(),
        };
        let column = leading + self.output.prompt.width() + self.output.before_cursor().width();
        u16::try_from(column).unwrap_or(u16::MAX)
    }

    /// Horizontal scroll that keeps the cursor inside a line `width` wide.
    /// Always lands on a grapheme boundary so a wide character is never cut.
    fn scroll_offset(&self, width: u16) -> u16 {
        let target = usize::from(self.cursor_column().saturating_sub(width.saturating_sub(1)));
        if target == 0 {
            return 0;
        }

        let mut column = 0;
        for span in self.spans() {
            for grapheme in span.content.graphemes(true) {
                if column >= target {
                    return u16::try_from(column).unwrap_or(u16::MAX);
                }
                column += grapheme.width();
            }
        }
        u16::try_from(column).unwrap_or(u16::MAX)
    }

    /// Where the terminal cursor belongs when this overlay is drawn in `area`.
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        if self.output.hidden {
            return None;
        }
        let inner = self.block().inner(area);
        if inner.width == 0 || inner.height == 0 {
            return None;
        }
        let column = self.cursor_column() - self.scroll_offset(inner.width);
        Some(Position::new(inner.x + column, inner.y))
    }
}

impl Widget for CommandLineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.output.hidden {
            return;
        }

        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let offset = usize::from(self.scroll_offset(inner.width));
        Paragraph::new(Line::from(skip_columns(self.spans(), offset)))
            .style(self.theme.output_style())
            .render(inner, buf);
    }
}

/// Drops whole graphemes from the front of `spans` until `columns` display
/// columns are gone.
fn skip_columns(spans: Vec<Span<'_>>, columns: usize) -> Vec<Span<'_>> {
    let mut skipped = 0;
    let mut visible = Vec::with_capacity(spans.len());
    for span in spans {
        if skipped >= columns {
            visible.push(span);
            continue;
        }
        let mut rest = String::new();
        for grapheme in span.content.graphemes(true) {
            if skipped >= columns {
                rest.push_str(grapheme);
            } else {
                skipped += grapheme.width();
            }
        }
        if !rest.is_empty() {
            visible.push(Span::styled(rest, span.style));
        }
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::segments::Segmentation;
    use super::super::state::{CommandLineState, ViewLocalState};
    use super::super::view::render;
    use crate::components::icon::UnicodeIcons;
    use ratatui::{backend::TestBackend, Terminal};

    fn output(content: &str, position: usize, prompt: &str, first_char: &str, visible: bool) -> RenderOutput {
        let state = CommandLineState {
            visible,
            content: content.to_string(),
            position,
            first_char: first_char.to_string(),
            level: 1,
            prompt: prompt.to_string(),
            show_icons: true,
        };
        render(&state, &mut ViewLocalState::default(), Segmentation::Chars).0
    }

    fn draw(output: &RenderOutput, width: u16) -> String {
        draw_with_cursor(output, width).0
    }

    /// Draws the overlay and returns the content row plus the symbol in the
    /// cell where the terminal cursor would be parked.
    fn draw_with_cursor(output: &RenderOutput, width: u16) -> (String, Option<String>) {
        let theme = Theme::default();
        let backend = TestBackend::new(width, OVERLAY_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut cursor = None;
        terminal
            .draw(|f| {
                let area = f.area();
                let widget = CommandLineWidget::new(output, &theme, &UnicodeIcons);
                cursor = widget.cursor_position(area);
                f.render_widget(widget, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let line = (0..buffer.area().width)
            .map(|x| buffer.cell((x, 1)).map(|c| c.symbol()).unwrap_or(" "))
            .collect();
        let at_cursor = cursor.and_then(|p| buffer.cell(p)).map(|c| c.symbol().to_string());
        (line, at_cursor)
    }

    #[test]
    fn test_renders_prompt_content_and_cursor() {
        let line = draw(&output("edit foo.txt", 5, ":", "", true), 30);
        assert!(line.contains(":edit ▏foo.txt"), "line was {:?}", line);
    }

    #[test]
    fn test_renders_search_icons() {
        let line = draw(&output("", 0, "", "/", true), 20);
        assert!(line.contains("⌕→ ▏"), "line was {:?}", line);

        let line = draw(&output("", 0, "", "?", true), 20);
        assert!(line.contains("⌕← ▏"), "line was {:?}", line);
    }

    #[test]
    fn test_hidden_output_draws_nothing() {
        let line = draw(&output("secret", 6, ":", "", false), 20);
        assert_eq!(line.trim(), "");
    }

    #[test]
    fn test_cursor_column_counts_display_width() {
        let theme = Theme::default();
        let out = output("日本語", 2, ":", "", true);
        let widget = CommandLineWidget::new(&out, &theme, &UnicodeIcons);
        assert_eq!(widget.cursor_column(), 1 + 4);

        let out = output("ab", 1, "", "/", true);
        let widget = CommandLineWidget::new(&out, &theme, &UnicodeIcons);
        // search + arrow + margin + "a"
        assert_eq!(widget.cursor_column(), 4);
    }

    #[test]
    fn test_long_content_scrolls_to_cursor() {
        let content = "a".repeat(40);
        let line = draw(&output(&content, 40, ":", "", true), 20);
        assert!(line.contains('▏'), "line was {:?}", line);
    }

    #[test]
    fn test_wide_content_scroll_keeps_cursor_marker() {
        let content = "日".repeat(30);
        // Both parities of the raw offset, with and without the 3-column
        // search prefix.
        for (first_char, prompt) in [("/", ""), ("", ":")] {
            for position in 0..=30 {
                let out = output(&content, position, prompt, first_char, true);
                let (line, at_cursor) = draw_with_cursor(&out, 20);
                assert!(line.contains('▏'), "position {} line was {:?}", position, line);
                assert_eq!(
                    at_cursor.as_deref(),
                    Some("▏"),
                    "position {} line was {:?}",
                    position,
                    line
                );
            }
        }
    }

    #[test]
    fn test_skip_columns_drops_whole_graphemes() {
        let spans = vec![Span::raw("a日"), Span::raw("b")];
        let visible = skip_columns(spans, 3);
        assert_eq!(visible, vec![Span::raw("b")]);

        let spans = vec![Span::raw("ab"), Span::raw("cd")];
        let visible = skip_columns(spans, 1);
        assert_eq!(visible, vec![Span::raw("b"), Span::raw("cd")]);
    }

    #[test]
    fn test_cursor_position_inside_overlay() {
        let theme = Theme::default();
        let out = output("abc", 2, ":", "", true);
        let widget = CommandLineWidget::new(&out, &theme, &UnicodeIcons);
        let area = Rect::new(10, 0, 30, OVERLAY_HEIGHT);
        assert_eq!(widget.cursor_position(area), Some(Position::new(11 + 3, 1)));

        let hidden = output("abc", 2, ":", "", false);
        let widget = CommandLineWidget::new(&hidden, &theme, &UnicodeIcons);
        assert_eq!(widget.cursor_position(area), None);
    }

    #[test]
    fn test_overlay_area_is_centered_and_capped() {
        let area = overlay_area(Rect::new(0, 0, 200, 40), 75, 90);
        assert_eq!(area.width, 90);
        assert_eq!(area.x, 55);
        assert_eq!(area.height, OVERLAY_HEIGHT);

        let area = overlay_area(Rect::new(0, 0, 40, 2), 75, 90);
        assert_eq!(area.width, 30);
        assert_eq!(area.height, 2);
    }
}

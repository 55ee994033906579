// Rendering - draw() and overlay placement

use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::App;
use crate::components::command_line::{overlay_area, CommandLineWidget, FocusSurface};
use crate::error::{OverlayError, Result};
use crate::input::surface::InputSurface;

const HELP: &[(&str, &str)] = &[
    (":", "command"),
    ("/", "search forward"),
    ("?", "search backward"),
    ("i", "input prompt"),
    ("Ctrl-R", "nested line"),
    ("q", "quit"),
];

impl App {
    /// Creates the input surface the first time there is output to draw.
    fn ensure_surface(&mut self) {
        if self.surface.is_some() || self.view.committed().is_none() {
            return;
        }
        let surface = Rc::new(InputSurface::new());
        let handle: Rc<dyn FocusSurface> = surface.clone();
        self.view.attach_surface(&handle);
        self.surface = Some(surface);
    }

    pub(super) fn draw(&mut self) -> Result<()> {
        self.ensure_surface();

        // Clone what the frame closure needs so it doesn't borrow self.
        let theme = self.config_manager.theme().clone();
        let config = self.config_manager.app_config().commandline.clone();
        let output = self.view.committed().cloned();
        let has_focus = self.surface.as_ref().is_some_and(|s| s.has_focus());
        let status = match output.as_ref().map(|o| o.level) {
            Some(level) if level > 1 && !output.as_ref().is_some_and(|o| o.hidden) => {
                format!("level {}  {}", level, self.status)
            }
            _ => self.status.clone(),
        };
        let mode = self.input_mode;

        self.terminal
            .draw(|frame| {
                let area = frame.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(1), Constraint::Length(1)])
                    .split(area);

                let help: Vec<Line> = HELP
                    .iter()
                    .map(|(key, what)| {
                        Line::from(vec![
                            Span::styled(
                                format!("{:>8}", key),
                                Style::default()
                                    .fg(theme.colors.accent.to_color())
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Span::raw("  "),
                            Span::styled(*what, Style::default().fg(theme.colors.foreground.to_color())),
                        ])
                    })
                    .collect();
                let body = Paragraph::new(help)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(theme.colors.muted.to_color()))
                            .title(" cmdline-overlay "),
                    )
                    .style(Style::default().bg(theme.colors.background.to_color()))
                    .wrap(Wrap { trim: true });
                frame.render_widget(body, chunks[0]);

                let status_line = Line::from(vec![
                    Span::styled(
                        format!(" {:?} ", mode).to_uppercase(),
                        Style::default()
                            .fg(theme.colors.background.to_color())
                            .bg(theme.colors.primary.to_color()),
                    ),
                    Span::raw(" "),
                    Span::styled(status, Style::default().fg(theme.colors.muted.to_color())),
                ]);
                frame.render_widget(Paragraph::new(status_line), chunks[1]);

                // The overlay slot is computed even when hidden.
                let Some(output) = output.as_ref() else {
                    return;
                };
                let slot = overlay_area(chunks[0], config.width_percent, config.max_width);
                let widget = CommandLineWidget::new(output, &theme, config.icon_theme.icon_set());
                let cursor = widget.cursor_position(slot);
                if !output.hidden {
                    frame.render_widget(Clear, slot);
                }
                frame.render_widget(widget, slot);

                if let (true, Some(position)) = (has_focus, cursor) {
                    frame.set_cursor_position(position);
                }
            })
            .map_err(|e| OverlayError::Terminal(e.to_string()))?;

        self.dirty = false;

        // Focus is applied once the overlay exists on screen; the next frame
        // places the terminal cursor.
        if self.view.apply_focus() {
            self.mark_dirty();
        }
        Ok(())
    }
}

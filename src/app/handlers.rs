// Event handlers and action dispatch

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::App;
use crate::action::Action;
use crate::error::Result;
use crate::event::Event;
use crate::input::mode::InputMode;

/// Prompt used by the `i` demo binding.
const INPUT_PROMPT: &str = "Input: ";

impl App {
    pub(super) fn handle_event(&mut self, event: Event) -> Option<Action> {
        match event {
            Event::Input(CrosstermEvent::Key(key)) => map_key(self.input_mode, key),
            Event::Input(CrosstermEvent::Paste(text)) if self.input_mode.is_command() => {
                Some(Action::InsertText(text))
            }
            Event::Input(CrosstermEvent::Resize(..)) => Some(Action::Render),
            Event::Input(_) => None,
            Event::Tick => Some(Action::Tick),
            Event::ConfigChanged(path) => Some(Action::ReloadConfig(path)),
            Event::ConfigError(message) => {
                tracing::warn!("Config watcher error: {}", message);
                None
            }
        }
    }

    pub(super) fn dispatch(&mut self, action: Action) -> Result<()> {
        let editor = &mut self.editor;
        let changed = match action {
            Action::Quit => {
                self.should_quit = true;
                false
            }
            Action::Tick => false,
            Action::Render => {
                self.mark_dirty();
                false
            }
            Action::OpenCommandLine { first_char } => {
                let mut buf = [0u8; 4];
                editor.open(first_char.encode_utf8(&mut buf), "")
            }
            Action::OpenPrompt { prompt } => editor.open("", &prompt),
            Action::OpenNested => editor.open_nested(),
            Action::InsertChar(c) => editor.insert_char(c),
            Action::InsertText(text) => editor.insert_str(&text.replace(['\r', '\n'], " ")),
            Action::DeleteBackward => editor.delete_backward(),
            Action::DeleteForward => editor.delete_forward(),
            Action::CursorLeft => editor.move_left(),
            Action::CursorRight => editor.move_right(),
            Action::CursorHome => editor.move_home(),
            Action::CursorEnd => editor.move_end(),
            Action::Submit => {
                if let Some(command) = editor.submit() {
                    tracing::info!("Submitted command line: {:?}", command);
                    self.status = format!("Submitted: {}", command);
                    self.mark_dirty();
                }
                true
            }
            Action::Cancel => editor.cancel(),
            Action::ReloadConfig(path) => {
                self.reload_config(&path);
                false
            }
        };

        if changed {
            self.publish_command_line();
        }
        Ok(())
    }

    fn reload_config(&mut self, path: &std::path::Path) {
        self.config_manager.reload_file(path);
        self.cli.apply_overrides(self.config_manager.app_config_mut());

        let config = self.config_manager.app_config().clone();
        let segmentation = config.commandline.segmentation;
        if segmentation != self.view.segmentation() {
            self.editor.set_segmentation(segmentation);
            self.view.set_segmentation(segmentation);
            self.publish_command_line();
        }
        self.store.set_configuration(config);
        // Theme changes are not part of the store; redraw unconditionally.
        self.mark_dirty();
    }
}

fn map_key(mode: InputMode, key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('c') if ctrl => Some(Action::Quit),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char(c @ (':' | '/' | '?')) => Some(Action::OpenCommandLine { first_char: c }),
            KeyCode::Char('i') => Some(Action::OpenPrompt {
                prompt: INPUT_PROMPT.to_string(),
            }),
            _ => None,
        },
        InputMode::Command => match key.code {
            KeyCode::Char('c') if ctrl => Some(Action::Cancel),
            KeyCode::Char('r') if ctrl => Some(Action::OpenNested),
            KeyCode::Char('a') if ctrl => Some(Action::CursorHome),
            KeyCode::Char('e') if ctrl => Some(Action::CursorEnd),
            KeyCode::Char('b') if ctrl => Some(Action::CursorLeft),
            KeyCode::Char('f') if ctrl => Some(Action::CursorRight),
            KeyCode::Char(_) if ctrl => None,
            KeyCode::Char(c) => Some(Action::InsertChar(c)),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::DeleteBackward),
            KeyCode::Delete => Some(Action::DeleteForward),
            KeyCode::Left => Some(Action::CursorLeft),
            KeyCode::Right => Some(Action::CursorRight),
            KeyCode::Home => Some(Action::CursorHome),
            KeyCode::End => Some(Action::CursorEnd),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_normal_mode_opens_command_line() {
        assert_eq!(
            map_key(InputMode::Normal, key(KeyCode::Char('/'))),
            Some(Action::OpenCommandLine { first_char: '/' })
        );
        assert_eq!(
            map_key(InputMode::Normal, key(KeyCode::Char('?'))),
            Some(Action::OpenCommandLine { first_char: '?' })
        );
        assert_eq!(map_key(InputMode::Normal, key(KeyCode::Char('x'))), None);
        assert_eq!(map_key(InputMode::Normal, key(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_command_mode_inserts_text() {
        assert_eq!(
            map_key(InputMode::Command, key(KeyCode::Char('q'))),
            Some(Action::InsertChar('q'))
        );
        assert_eq!(map_key(InputMode::Command, key(KeyCode::Esc)), Some(Action::Cancel));
        assert_eq!(map_key(InputMode::Command, key(KeyCode::Enter)), Some(Action::Submit));
        assert_eq!(map_key(InputMode::Command, ctrl('r')), Some(Action::OpenNested));
        assert_eq!(map_key(InputMode::Command, ctrl('z')), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut release = key(KeyCode::Char(':'));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(InputMode::Normal, release), None);
    }
}

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,
    Render,

    // Opening command mode
    OpenCommandLine { first_char: char },
    OpenPrompt { prompt: String },
    OpenNested,

    // Editing
    InsertChar(char),
    InsertText(String),
    DeleteBackward,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,

    Submit,
    Cancel,

    ReloadConfig(PathBuf),
}

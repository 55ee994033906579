/// Snapshot of the command line as published by the state container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLineState {
    pub visible: bool,
    pub content: String,
    /// Cursor offset into `content`, in segmentation units.
    pub position: usize,
    /// Character that opened command mode (`:`, `/`, `?`, ...). May be empty.
    pub first_char: String,
    /// Nesting depth of command mode. Not used for rendering.
    pub level: usize,
    pub prompt: String,
    pub show_icons: bool,
}

/// Per-view state that survives across renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewLocalState {
    pub focused: bool,
}

/// Whether a render asked for the input surface to take focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusIntent {
    #[default]
    None,
    Acquire,
}

impl ViewLocalState {
    /// One-way latch: flips to focused the first time the view is visible.
    pub fn activate(&mut self, visible: bool) -> FocusIntent {
        if !self.focused && visible {
            self.focused = true;
            FocusIntent::Acquire
        } else {
            FocusIntent::None
        }
    }
}

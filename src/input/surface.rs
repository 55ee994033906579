use std::cell::Cell;

use crate::components::command_line::FocusSurface;
use crate::error::Result;

/// The overlay's input target in the terminal. Once focused, the renderer
/// parks the terminal cursor on the command line's cursor marker.
#[derive(Debug, Default)]
pub struct InputSurface {
    focused: Cell<bool>,
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_focus(&self) -> bool {
        self.focused.get()
    }
}

impl FocusSurface for InputSurface {
    fn focus(&self) -> Result<()> {
        if !self.focused.replace(true) {
            tracing::debug!("Input surface focused");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Keys edit the command line.
    Command,
}

impl InputMode {
    pub fn is_command(&self) -> bool {
        matches!(self, InputMode::Command)
    }
}

use std::path::PathBuf;

use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum Event {
    /// Input from crossterm (keyboard, paste, resize)
    Input(CrosstermEvent),
    /// Poll timeout elapsed with no input
    Tick,
    /// A watched configuration file changed
    ConfigChanged(PathBuf),
    /// The config watcher reported an error
    ConfigError(String),
}

// App module
// - mod.rs: App struct, constructor, terminal teardown
// - event_loop.rs: run() loop, input/config/state polling
// - rendering.rs: draw() and overlay placement
// - handlers.rs: key mapping and action dispatch

mod event_loop;
mod handlers;
mod rendering;

use std::io::{self, Stdout};
use std::rc::Rc;

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::cli::Cli;
use crate::components::command_line::CommandLineView;
use crate::config::{ConfigManager, ConfigWatcherMode};
use crate::editor::CommandLineEditor;
use crate::error::{OverlayError, Result};
use crate::input::mode::InputMode;
use crate::input::surface::InputSurface;
use crate::store::{StateSubscription, Store};

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    should_quit: bool,
    dirty: bool,
    input_mode: InputMode,
    cli: Cli,
    config_manager: ConfigManager,
    config_watcher: Option<ConfigWatcherMode>,
    store: Store,
    subscription: StateSubscription,
    editor: CommandLineEditor,
    view: CommandLineView,
    /// Created the first time the overlay has output to draw.
    surface: Option<Rc<InputSurface>>,
    status: String,
}

impl App {
    pub fn new(cli: Cli, config_manager: ConfigManager) -> Result<Self> {
        let config = config_manager.app_config().clone();
        let segmentation = config.commandline.segmentation;

        let config_watcher = config.general.watch_config.then(|| {
            ConfigWatcherMode::start(
                config_manager.config_dir(),
                config.general.config_watch_debounce_ms,
            )
        });

        let store = Store::new(config);
        let subscription = store.subscribe();

        enable_raw_mode().map_err(|e| OverlayError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .map_err(|e| OverlayError::Terminal(e.to_string()))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| OverlayError::Terminal(e.to_string()))?;

        tracing::info!("Starting with config dir {}", config_manager.config_dir().display());

        Ok(Self {
            terminal,
            should_quit: false,
            dirty: true,
            input_mode: InputMode::Normal,
            cli,
            config_manager,
            config_watcher,
            store,
            subscription,
            editor: CommandLineEditor::new(segmentation),
            view: CommandLineView::new(segmentation),
            surface: None,
            status: String::new(),
        })
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Publishes the editor's current command line to the store.
    fn publish_command_line(&mut self) {
        self.store.set_command_line(self.editor.model());
        self.input_mode = if self.editor.is_visible() {
            InputMode::Command
        } else {
            InputMode::Normal
        };
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.view.detach_surface();
        self.surface = None;
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
    }
}

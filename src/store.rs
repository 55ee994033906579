//! Application state container. The editor side writes; views subscribe and
//! read snapshots through selectors.

use tokio::sync::watch;

use crate::components::command_line::CommandLineState;
use crate::config::AppConfig;
use crate::error::{OverlayError, Result};

/// Command line fields as produced by the editor core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLineModel {
    pub visible: bool,
    pub content: String,
    pub position: usize,
    pub first_char: String,
    pub level: usize,
    pub prompt: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// `None` until the editor publishes command line state for the first time.
    pub command_line: Option<CommandLineModel>,
    pub configuration: AppConfig,
}

/// Maps global state to the command line view's input.
pub fn select_command_line(state: &AppState) -> Option<CommandLineState> {
    let model = state.command_line.as_ref()?;
    Some(CommandLineState {
        visible: model.visible,
        content: model.content.clone(),
        position: model.position,
        first_char: model.first_char.clone(),
        level: model.level,
        prompt: model.prompt.clone(),
        show_icons: state.configuration.show_icons(),
    })
}

pub struct Store {
    tx: watch::Sender<AppState>,
}

impl Store {
    pub fn new(configuration: AppConfig) -> Self {
        let (tx, _rx) = watch::channel(AppState {
            command_line: None,
            configuration,
        });
        Self { tx }
    }

    /// Applies `f`; subscribers are notified only when it returns true.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut AppState) -> bool,
    {
        self.tx.send_if_modified(f)
    }

    /// Publishes a new command line model if it differs from the current one.
    pub fn set_command_line(&self, model: CommandLineModel) -> bool {
        self.update(|state| {
            if state.command_line.as_ref() == Some(&model) {
                return false;
            }
            state.command_line = Some(model);
            true
        })
    }

    pub fn set_configuration(&self, configuration: AppConfig) -> bool {
        self.update(|state| {
            if state.configuration == configuration {
                return false;
            }
            state.configuration = configuration;
            true
        })
    }

    pub fn subscribe(&self) -> StateSubscription {
        let mut rx = self.tx.subscribe();
        // Treat the current state as pending so the first poll renders it.
        rx.mark_changed();
        StateSubscription { rx }
    }
}

pub struct StateSubscription {
    rx: watch::Receiver<AppState>,
}

impl StateSubscription {
    /// Returns the selected command line snapshot if a notification arrived
    /// since the last poll.
    pub fn poll(&mut self) -> Result<Option<Option<CommandLineState>>> {
        match self.rx.has_changed() {
            Ok(true) => Ok(Some(select_command_line(&self.rx.borrow_and_update()))),
            Ok(false) => Ok(None),
            Err(_) => Err(OverlayError::ChannelClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn model(content: &str, position: usize) -> CommandLineModel {
        CommandLineModel {
            visible: true,
            content: content.to_string(),
            position,
            first_char: ":".to_string(),
            level: 1,
            prompt: String::new(),
        }
    }

    #[test]
    fn test_selector_without_command_line() {
        assert_eq!(select_command_line(&AppState::default()), None);
    }

    #[test]
    fn test_selector_reads_icon_setting() {
        let mut state = AppState {
            command_line: Some(model("w", 1)),
            configuration: AppConfig::default(),
        };
        let selected = select_command_line(&state).unwrap();
        assert!(selected.show_icons);
        assert_eq!(selected.content, "w");
        assert_eq!(selected.first_char, ":");

        state.configuration.commandline.icons = false;
        assert!(!select_command_line(&state).unwrap().show_icons);
    }

    #[test]
    fn test_subscription_sees_initial_state_once() {
        let store = Store::new(AppConfig::default());
        let mut sub = store.subscribe();
        assert_eq!(sub.poll().unwrap(), Some(None));
        assert_eq!(sub.poll().unwrap(), None);
    }

    #[test]
    fn test_unchanged_updates_do_not_notify() {
        let store = Store::new(AppConfig::default());
        let mut sub = store.subscribe();
        sub.poll().unwrap();

        assert!(store.set_command_line(model("q", 1)));
        let selected = sub.poll().unwrap().flatten().unwrap();
        assert_eq!(selected.content, "q");

        assert!(!store.set_command_line(model("q", 1)));
        assert_eq!(sub.poll().unwrap(), None);

        assert!(!store.set_configuration(AppConfig::default()));
        assert_eq!(sub.poll().unwrap(), None);
    }

    #[test]
    fn test_configuration_change_notifies() {
        let store = Store::new(AppConfig::default());
        store.set_command_line(model("", 0));
        let mut sub = store.subscribe();
        sub.poll().unwrap();

        let mut config = AppConfig::default();
        config.commandline.icons = false;
        assert!(store.set_configuration(config));
        let selected = sub.poll().unwrap().flatten().unwrap();
        assert!(!selected.show_icons);
        assert!(!store.tx.borrow().configuration.commandline.icons);
    }

    #[test]
    fn test_poll_after_store_dropped() {
        let store = Store::new(AppConfig::default());
        let mut sub = store.subscribe();
        drop(store);
        assert!(matches!(sub.poll(), Err(OverlayError::ChannelClosed)));
    }
}

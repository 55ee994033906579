// Event loop - main run() method and source polling

use std::time::Duration;

use crossterm::event;

use super::App;
use crate::error::{OverlayError, Result};
use crate::event::Event;

impl App {
    pub fn run(&mut self) -> Result<()> {
        loop {
            // ---- 1. Non-input sources ----
            for event in self.poll_config_events() {
                if let Some(action) = self.handle_event(event) {
                    self.dispatch(action)?;
                }
            }

            // ---- 2. Store notifications ----
            self.poll_state()?;

            // ---- 3. Draw only when something changed ----
            if self.dirty {
                self.draw()?;
            }

            if self.should_quit {
                break;
            }

            // ---- 4. Input ----
            let event = self.next_input()?;
            if let Some(action) = self.handle_event(event) {
                self.dispatch(action)?;
            }
        }

        tracing::info!("Exiting");
        Ok(())
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config_manager.app_config().general.tick_interval_ms)
    }

    fn next_input(&self) -> Result<Event> {
        let ready = event::poll(self.tick_interval())
            .map_err(|e| OverlayError::Terminal(e.to_string()))?;
        if !ready {
            return Ok(Event::Tick);
        }
        let input = event::read().map_err(|e| OverlayError::Terminal(e.to_string()))?;
        Ok(Event::Input(input))
    }

    fn poll_config_events(&mut self) -> Vec<Event> {
        let Some(watcher) = self.config_watcher.as_mut() else {
            return Vec::new();
        };
        watcher
            .poll_events()
            .into_iter()
            .map(|event| match event {
                crate::config::ConfigEvent::Changed(path) => Event::ConfigChanged(path),
                crate::config::ConfigEvent::Error(message) => Event::ConfigError(message),
            })
            .collect()
    }

    /// Re-renders the command line when the store published a change and
    /// marks the frame dirty if the committed output differs.
    pub(super) fn poll_state(&mut self) -> Result<()> {
        if let Some(snapshot) = self.subscription.poll()? {
            if self.view.update(snapshot.as_ref()) {
                self.mark_dirty();
            }
        }
        Ok(())
    }
}

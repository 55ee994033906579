use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant, SystemTime};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{OverlayError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    Changed(PathBuf),
    Error(String),
}

pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<ConfigEvent>,
}

impl ConfigWatcher {
    pub fn new(config_dir: &Path) -> Result<Self> {
        let (tx, rx) = channel::<ConfigEvent>();
        let watcher = Self::setup_watcher(config_dir, tx)?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    fn setup_watcher(config_dir: &Path, tx: Sender<ConfigEvent>) -> Result<RecommendedWatcher> {
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<notify::Event>| {
            match result {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        for path in event.paths {
                            if is_config_file(&path) {
                                let _ = tx.send(ConfigEvent::Changed(path));
                            }
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(ConfigEvent::Error(e.to_string()));
                }
            }
        })
        .map_err(|e| OverlayError::Config(format!("Failed to create watcher: {}", e)))?;

        if config_dir.exists() {
            watcher
                .watch(config_dir, RecursiveMode::NonRecursive)
                .map_err(|e| OverlayError::Config(format!("Failed to watch config dir: {}", e)))?;
        }

        Ok(watcher)
    }

    pub fn poll_events(&self) -> Vec<ConfigEvent> {
        self.rx.try_iter().collect()
    }
}

pub(crate) fn is_config_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("toml"))
}

/// mtime polling for filesystems where `notify` is unavailable.
pub struct TickBasedWatcher {
    config_dir: PathBuf,
    last_check: Instant,
    check_interval: Duration,
    file_mtimes: HashMap<PathBuf, SystemTime>,
}

impl TickBasedWatcher {
    pub fn new(config_dir: PathBuf, check_interval_ms: u64) -> Self {
        let mut watcher = Self {
            config_dir,
            last_check: Instant::now(),
            check_interval: Duration::from_millis(check_interval_ms),
            file_mtimes: HashMap::new(),
        };
        for (path, mtime) in watcher.scan() {
            watcher.file_mtimes.insert(path, mtime);
        }
        watcher
    }

    fn scan(&self) -> Vec<(PathBuf, SystemTime)> {
        let Ok(entries) = std::fs::read_dir(&self.config_dir) else {
            return Vec::new();
        };
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| is_config_file(path))
            .filter_map(|path| {
                let mtime = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;
                Some((path, mtime))
            })
            .collect()
    }

    pub fn check(&mut self) -> Vec<ConfigEvent> {
        if self.last_check.elapsed() < self.check_interval {
            return Vec::new();
        }
        self.last_check = Instant::now();

        let mut events = Vec::new();
        for (path, mtime) in self.scan() {
            let changed = self
                .file_mtimes
                .get(&path)
                .map(|&old| old != mtime)
                .unwrap_or(true);
            if changed {
                self.file_mtimes.insert(path.clone(), mtime);
                events.push(ConfigEvent::Changed(path));
            }
        }
        events
    }
}

pub enum ConfigWatcherMode {
    Notify(ConfigWatcher),
    Tick(TickBasedWatcher),
}

impl ConfigWatcherMode {
    pub fn notify(config_dir: &Path) -> Result<Self> {
        Ok(Self::Notify(ConfigWatcher::new(config_dir)?))
    }

    pub fn tick(config_dir: PathBuf, check_interval_ms: u64) -> Self {
        Self::Tick(TickBasedWatcher::new(config_dir, check_interval_ms))
    }

    /// Prefers `notify`, falling back to mtime polling when it can't start.
    pub fn start(config_dir: &Path, check_interval_ms: u64) -> Self {
        match Self::notify(config_dir) {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!("{}; falling back to polling", e);
                Self::tick(config_dir.to_path_buf(), check_interval_ms)
            }
        }
    }

    pub fn poll_events(&mut self) -> Vec<ConfigEvent> {
        match self {
            Self::Notify(watcher) => watcher.poll_events(),
            Self::Tick(watcher) => watcher.check(),
        }
    }
}

mod theme;
mod watcher;

pub use theme::Theme;
pub use watcher::{ConfigEvent, ConfigWatcherMode};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::components::command_line::Segmentation;
use crate::components::icon::IconTheme;
use crate::error::{OverlayError, Result};

const CONFIG_DIR: &str = "cmdline-overlay";
const MAIN_CONFIG_FILE: &str = "config.toml";
const THEME_FILE: &str = "theme.toml";

/// Dotted setting key that toggles icon rendering of the leading character.
pub const ICONS_SETTING: &str = "commandline.icons";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub commandline: CommandLineConfig,
}

impl AppConfig {
    /// Resolves a dotted key like `"commandline.icons"` against this config.
    pub fn setting(&self, key: &str) -> Option<toml::Value> {
        let mut value = toml::Value::try_from(self).ok()?;
        for part in key.split('.') {
            value = value.as_table_mut()?.remove(part)?;
        }
        Some(value)
    }

    pub fn bool_setting(&self, key: &str) -> Option<bool> {
        self.setting(key).and_then(|v| v.as_bool())
    }

    pub fn show_icons(&self) -> bool {
        self.bool_setting(ICONS_SETTING).unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub tick_interval_ms: u64,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub watch_config: bool,
    pub config_watch_debounce_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 250,
            log_level: "info".to_string(),
            log_file: None,
            watch_config: true,
            config_watch_debounce_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandLineConfig {
    pub icons: bool,
    pub icon_theme: IconTheme,
    pub segmentation: Segmentation,
    pub width_percent: u16,
    pub max_width: u16,
}

impl Default for CommandLineConfig {
    fn default() -> Self {
        Self {
            icons: true,
            icon_theme: IconTheme::Unicode,
            segmentation: Segmentation::Chars,
            width_percent: 75,
            max_width: 90,
        }
    }
}

pub struct ConfigManager {
    config_dir: PathBuf,
    app_config: AppConfig,
    theme: Theme,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = Self::default_config_dir()?;
        Ok(Self::load_from(config_dir))
    }

    /// Loads from an explicit directory, which must exist.
    pub fn with_dir(config_dir: PathBuf) -> Result<Self> {
        if !config_dir.is_dir() {
            return Err(OverlayError::ConfigNotFound { path: config_dir });
        }
        Ok(Self::load_from(config_dir))
    }

    fn load_from(config_dir: PathBuf) -> Self {
        let app_config = Self::load_app_config(&config_dir);
        let theme = Self::load_theme(&config_dir);
        tracing::debug!("Loaded configuration from {}", config_dir.display());

        Self {
            config_dir,
            app_config,
            theme,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.app_config
    }

    pub fn app_config_mut(&mut self) -> &mut AppConfig {
        &mut self.app_config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn reload_all(&mut self) {
        self.app_config = Self::load_app_config(&self.config_dir);
        self.theme = Self::load_theme(&self.config_dir);
    }

    pub fn reload_file(&mut self, path: &Path) {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(MAIN_CONFIG_FILE) => {
                self.app_config = Self::load_app_config(&self.config_dir);
            }
            Some(THEME_FILE) => {
                self.theme = Self::load_theme(&self.config_dir);
            }
            _ => self.reload_all(),
        }
        tracing::info!("Reloaded {}", path.display());
    }

    fn default_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| OverlayError::Config("Could not determine config directory".to_string()))
    }

    fn load_app_config(config_dir: &Path) -> AppConfig {
        Self::load_toml_file(&config_dir.join(MAIN_CONFIG_FILE)).unwrap_or_default()
    }

    fn load_theme(config_dir: &Path) -> Theme {
        Self::load_toml_file(&config_dir.join(THEME_FILE)).unwrap_or_default()
    }

    fn load_toml_file<T: for<'de> Deserialize<'de>>(path: &Path) -> Option<T> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)
                .map_err(|e| OverlayError::Config(format!("Failed to create config dir: {}", e)))?;
        }
        Ok(())
    }

    pub fn write_default_configs(&self) -> Result<()> {
        self.ensure_config_dir()?;

        let main_path = self.config_dir.join(MAIN_CONFIG_FILE);
        if !main_path.exists() {
            let content = toml::to_string_pretty(&AppConfig::default())
                .map_err(|e| OverlayError::Config(format!("Failed to serialize config: {}", e)))?;
            std::fs::write(&main_path, content)
                .map_err(|e| OverlayError::Config(format!("Failed to write config: {}", e)))?;
        }

        let theme_path = self.config_dir.join(THEME_FILE);
        if !theme_path.exists() {
            let content = toml::to_string_pretty(&Theme::default())
                .map_err(|e| OverlayError::Config(format!("Failed to serialize theme: {}", e)))?;
            std::fs::write(&theme_path, content)
                .map_err(|e| OverlayError::Config(format!("Failed to write theme: {}", e)))?;
        }

        Ok(())
    }
}

use std::path::PathBuf;

use clap::Parser;

use crate::components::command_line::Segmentation;
use crate::config::AppConfig;

/// cmdline-overlay: editor-style command line overlay for the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "cmdline-overlay")]
#[command(version)]
#[command(about = "Editor-style command line overlay for the terminal", long_about = None)]
pub struct Cli {
    /// Read config.toml and theme.toml from this directory instead of the
    /// platform config directory
    #[arg(short = 'c', long, value_name = "DIR", env = "CMDLINE_OVERLAY_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides general.log_level.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log file. Overrides general.log_file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Render the leading character as text instead of icons
    #[arg(long, default_value_t = false)]
    pub no_icons: bool,

    /// Count cursor positions in grapheme clusters instead of characters
    #[arg(long, default_value_t = false)]
    pub graphemes: bool,

    /// Write default config files into the config directory and exit
    #[arg(long, default_value_t = false)]
    pub write_default_config: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Applies flag overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if self.no_icons {
            config.commandline.icons = false;
        }
        if self.graphemes {
            config.commandline.segmentation = Segmentation::Graphemes;
        }
        if let Some(level) = &self.log_level {
            config.general.log_level = level.clone();
        }
        if let Some(path) = &self.log_file {
            config.general.log_file = Some(path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["cmdline-overlay"]);
        assert!(!cli.no_icons);
        assert!(!cli.graphemes);
        assert!(!cli.write_default_config);
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_config_dir_flag() {
        let cli = Cli::parse_from(["cmdline-overlay", "-c", "/tmp/overlay"]);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/overlay")));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "cmdline-overlay",
            "--no-icons",
            "--graphemes",
            "--log-level",
            "debug",
        ]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert!(!config.show_icons());
        assert_eq!(config.commandline.segmentation, Segmentation::Graphemes);
        assert_eq!(config.general.log_level, "debug");
        assert!(config.general.log_file.is_none());
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = Cli::parse_from(["cmdline-overlay"]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, AppConfig::default());
    }
}

mod action;
mod app;
mod cli;
mod components;
mod config;
mod editor;
mod error;
mod event;
mod input;
mod logging;
mod store;

use color_eyre::eyre::Result;

use cli::Cli;
use config::ConfigManager;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse_args();

    let mut config_manager = match &cli.config_dir {
        Some(dir) => ConfigManager::with_dir(dir.clone())?,
        None => ConfigManager::new()?,
    };

    if cli.write_default_config {
        config_manager.write_default_configs()?;
        println!("Wrote default config to {}", config_manager.config_dir().display());
        return Ok(());
    }

    cli.apply_overrides(config_manager.app_config_mut());

    // Held until exit so buffered log lines are flushed.
    let general = &config_manager.app_config().general;
    let _log_guard = match general.log_file.clone().or_else(logging::default_log_path) {
        Some(path) => Some(logging::init(&general.log_level, &path)?),
        None => None,
    };

    let mut app = app::App::new(cli, config_manager)?;
    app.run()?;

    Ok(())
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Terminal initialization failed: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("State channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, OverlayError>;

//! Error types for the card plugin.

use thiserror::Error;

/// Errors raised while loading config or delivering a card.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, PluginError>;

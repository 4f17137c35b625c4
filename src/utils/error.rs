//! Error types for fedora-configure

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigureError {
    #[error("Must be run as root")]
    NotRoot,

    #[error("{0} is not available for Fedora")]
    UnsupportedDesktop(String),

    #[error("Invalid desktop environment: {0:?} (see `list-desktops`)")]
    UnknownDesktop(String),

    #[error("Target root not found or not a directory: {0}")]
    TargetRootMissing(String),

    #[error("Invalid distro version: {0:?}")]
    InvalidDistroVersion(String),

    #[error("Command failed: {command} ({status})")]
    CommandFailed { command: String, status: String },

    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Interrupted by signal")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigureError {
    /// Errors caused by the desktop selector itself, shown highlighted to the user
    pub fn is_desktop_selection(&self) -> bool {
        matches!(self, Self::UnsupportedDesktop(_) | Self::UnknownDesktop(_))
    }
}

pub type Result<T> = std::result::Result<T, ConfigureError>;

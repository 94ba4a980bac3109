//! Persisted assistant settings
//!
//! Settings live in a TOML file under the user's config directory. They are
//! created with defaults on first run, edited through `replykit settings`,
//! and re-read before each suggestion request.

use thiserror::Error;

mod storage;
mod types;
mod validate;

pub use storage::{SettingsStore, settings_path};
pub use types::{ClipboardBackend, DEFAULT_MODEL, SETTING_KEYS, Settings};
pub use validate::validate;

/// Errors raised while loading, editing, or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings: {0}")]
    Invalid(String),

    #[error("Unknown setting `{0}`")]
    UnknownKey(String),

    #[error("Invalid value for `{key}`: {message}")]
    BadValue { key: String, message: String },

    #[error("Could not parse settings file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("No config directory available on this platform")]
    NoConfigDir,

    #[error("Settings IO error: {0}")]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

use crate::ai::provider::AiError;
use crate::settings::SettingsError;

/// Custom error types for replykit
#[derive(Debug, Error)]
pub enum ReplykitError {
    #[error("Invalid chat event: {0}")]
    InvalidEvent(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("Terminal required for the interactive console.\n\nRun it in a terminal with --feed, or use `replykit suggest` for one-shot use.")]
    NoTerminal,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;

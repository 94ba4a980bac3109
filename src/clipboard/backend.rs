//! Clipboard backend selection and error types

use thiserror::Error;

use super::{osc52, system};
use crate::settings::ClipboardBackend;

/// Errors that can occur during clipboard operations
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No system clipboard (headless session, no display server)
    #[error("system clipboard unavailable")]
    SystemUnavailable,
    #[error("clipboard write failed: {0}")]
    WriteError(String),
}

/// Result type for clipboard operations
pub type ClipboardResult = Result<(), ClipboardError>;

/// Copy text using the configured backend
///
/// `Auto` tries the OS clipboard first and falls back to OSC 52, which
/// works over SSH and inside terminal multiplexers.
pub fn copy_to_clipboard(text: &str, backend: ClipboardBackend) -> ClipboardResult {
    match backend {
        ClipboardBackend::System => system::copy(text),
        ClipboardBackend::Osc52 => osc52::copy(text),
        ClipboardBackend::Auto => system::copy(text).or_else(|e| {
            log::debug!("System clipboard failed ({}), using OSC 52", e);
            osc52::copy(text)
        }),
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod backend_tests;

//! Tests for ReplykitError type

use super::*;

#[test]
fn test_invalid_event_error_display() {
    let error = ReplykitError::InvalidEvent("missing field `text`".to_string());
    let msg = error.to_string();
    assert!(msg.contains("Invalid chat event"));
    assert!(msg.contains("missing field `text`"));
}

#[test]
fn test_no_terminal_error_mentions_alternatives() {
    let msg = ReplykitError::NoTerminal.to_string();
    assert!(msg.contains("--feed"));
    assert!(msg.contains("replykit suggest"));
}

#[test]
fn test_io_error_from_std_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test error");
    let err = ReplykitError::from(io_err);
    assert!(matches!(err, ReplykitError::Io(_)));
    assert!(err.to_string().contains("test error"));
}

#[test]
fn test_settings_error_is_transparent() {
    let err = ReplykitError::from(SettingsError::Invalid("max_tokens out of range".to_string()));
    assert_eq!(
        err.to_string(),
        SettingsError::Invalid("max_tokens out of range".to_string()).to_string()
    );
}

#[test]
fn test_ai_error_is_transparent() {
    let err = ReplykitError::from(AiError::Timeout(30));
    assert!(err.to_string().contains("30"));
}

#[test]
fn test_error_debug() {
    let debug_str = format!("{:?}", ReplykitError::NoTerminal);
    assert!(debug_str.contains("NoTerminal"));
}

//! Settings validation
//!
//! Applied before settings are saved and before the console or `suggest`
//! acts on them. Plain loading does not validate, so a file edited by hand
//! still opens and can be fixed with `replykit settings set`.

use super::{Settings, SettingsError};

pub const MAX_TOKENS_RANGE: std::ops::RangeInclusive<u32> = 100..=2000;
pub const CONTEXT_MESSAGES_RANGE: std::ops::RangeInclusive<usize> = 5..=50;
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;
pub const TIMEOUT_SECS_RANGE: std::ops::RangeInclusive<u64> = 1..=300;

/// Prefix every OpenAI secret key starts with
const OPENAI_KEY_PREFIX: &str = "sk-";

/// Check a settings record before it is persisted
///
/// An empty API key is allowed so the file can be created on first run;
/// a missing key is reported when a suggestion is requested instead.
/// The `sk-` prefix is only enforced for the default OpenAI endpoint.
pub fn validate(settings: &Settings) -> Result<(), SettingsError> {
    if settings.has_api_key()
        && settings.base_url.is_none()
        && !settings.api_key.starts_with(OPENAI_KEY_PREFIX)
    {
        return Err(SettingsError::Invalid(format!(
            "API key must start with \"{}\"",
            OPENAI_KEY_PREFIX
        )));
    }

    if !MAX_TOKENS_RANGE.contains(&settings.max_tokens) {
        return Err(SettingsError::Invalid(format!(
            "max_tokens must be between {} and {}",
            MAX_TOKENS_RANGE.start(),
            MAX_TOKENS_RANGE.end()
        )));
    }

    if !CONTEXT_MESSAGES_RANGE.contains(&settings.context_messages) {
        return Err(SettingsError::Invalid(format!(
            "context_messages must be between {} and {}",
            CONTEXT_MESSAGES_RANGE.start(),
            CONTEXT_MESSAGES_RANGE.end()
        )));
    }

    if !TEMPERATURE_RANGE.contains(&settings.temperature) {
        return Err(SettingsError::Invalid(
            "temperature must be between 0 and 2".to_string(),
        ));
    }

    if !TIMEOUT_SECS_RANGE.contains(&settings.timeout_secs) {
        return Err(SettingsError::Invalid(format!(
            "timeout_secs must be between {} and {}",
            TIMEOUT_SECS_RANGE.start(),
            TIMEOUT_SECS_RANGE.end()
        )));
    }

    if let Some(url) = &settings.base_url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err(SettingsError::Invalid(format!(
            "base_url must be an http(s) URL, got `{}`",
            url
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod validate_tests;

//! AI provider abstraction
//!
//! Defines the AiProvider enum, AiError types, and the factory that builds a
//! provider from the current settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::Settings;

mod openai;

pub use openai::OpenAiClient;

/// Errors that can occur during AI operations
#[derive(Debug, Error)]
pub enum AiError {
    /// AI is not configured (missing API key or disabled)
    #[error("AI not configured: {0}")]
    NotConfigured(String),

    /// Network error during API request
    #[error("Network error: {0}")]
    Network(String),

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Failed to parse API response
    #[error("Parse error: {0}")]
    Parse(String),

    /// No reply within the configured budget
    #[error("Request timed out after {0}s")]
    Timeout(u64),
}

/// Role of a message sent to the chat-completion API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

/// One entry of the `messages` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Token accounting reported by the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A finished model reply
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    pub usage: Option<Usage>,
}

/// AI provider implementations
#[derive(Debug)]
pub enum AiProvider {
    /// OpenAI chat completions, or any endpoint speaking the same protocol
    OpenAi(OpenAiClient),
}

impl AiProvider {
    /// Create an AI provider from settings
    ///
    /// Returns an error if the settings cannot produce a working client
    /// (assistant disabled, missing API key).
    pub fn from_settings(settings: &Settings) -> Result<Self, AiError> {
        if !settings.enabled {
            return Err(AiError::NotConfigured(
                "assistant is disabled in settings".to_string(),
            ));
        }

        if !settings.has_api_key() {
            return Err(AiError::NotConfigured(
                "API key is missing. Set it with `replykit settings set api_key sk-...`"
                    .to_string(),
            ));
        }

        let client = OpenAiClient::new(
            settings.api_key.trim().to_string(),
            settings.model_or_default().to_string(),
            settings.base_url.clone(),
            settings.temperature,
            settings.max_tokens,
        )?;
        Ok(AiProvider::OpenAi(client))
    }

    /// Human-readable provider name for logs and the panel title
    pub fn provider_name(&self) -> &'static str {
        match self {
            AiProvider::OpenAi(client) if client.is_custom_endpoint() => "OpenAI-compatible",
            AiProvider::OpenAi(_) => "OpenAI",
        }
    }

    /// Request a single completion for the given messages
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, AiError> {
        match self {
            AiProvider::OpenAi(client) => client.complete(messages).await,
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;

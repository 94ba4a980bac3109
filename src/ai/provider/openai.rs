//! OpenAI chat-completions client
//!
//! Works against api.openai.com or any OpenAI-compatible server reached
//! through a custom `base_url` (Ollama, Groq, LM Studio, ...).

use serde::{Deserialize, Serialize};

use super::{AiError, ChatMessage, Completion, Usage};

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

const COMPLETIONS_PATH: &str = "/chat/completions";

/// OpenAI chat-completions client
#[derive(Debug)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_url: String,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiClient {
    /// Create a new client
    ///
    /// `base_url` may be a bare API root (`http://localhost:11434/v1`) or the
    /// full completions URL; a trailing slash is tolerated.
    pub fn new(
        api_key: String,
        model: String,
        base_url: Option<String>,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model,
            api_url: completions_url(base_url.as_deref()),
            temperature,
            max_tokens,
        })
    }

    /// The URL requests are posted to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Whether requests go somewhere other than api.openai.com
    pub fn is_custom_endpoint(&self) -> bool {
        !self.api_url.starts_with("https://api.openai.com/")
    }

    /// Serialize the request body for the given messages
    pub fn build_request_body(&self, messages: &[ChatMessage]) -> Result<String, AiError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        serde_json::to_string(&request).map_err(|e| AiError::Parse(e.to_string()))
    }

    /// Send the messages and wait for the full reply
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, AiError> {
        let body = self.build_request_body(messages)?;
        log::debug!(
            "POST {} (model {}, {} messages)",
            self.api_url,
            self.model,
            messages.len()
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(AiError::Api {
                code: status.as_u16(),
                message: api_error_message(&text, status.as_u16()),
            });
        }

        parse_completion(&text)
    }
}

/// Resolve the completions URL from an optional base URL
fn completions_url(base_url: Option<&str>) -> String {
    match base_url.map(str::trim).filter(|u| !u.is_empty()) {
        None => OPENAI_API_URL.to_string(),
        Some(url) => {
            let url = url.trim_end_matches('/');
            if url.ends_with(COMPLETIONS_PATH) {
                url.to_string()
            } else {
                format!("{}{}", url, COMPLETIONS_PATH)
            }
        }
    }
}

/// Prefer `error.message` from the body, else a generic status line
fn api_error_message(body: &str, code: u16) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| format!("API error: {}", code))
}

fn parse_completion(body: &str) -> Result<Completion, AiError> {
    let response: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| AiError::Parse(format!("unexpected response body: {}", e)))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AiError::Parse("response contained no message content".to_string()))?;

    Ok(Completion {
        content,
        usage: response.usage,
    })
}

#[cfg(test)]
#[path = "openai_tests.rs"]
mod openai_tests;

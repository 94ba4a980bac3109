// Settings type definitions

use serde::{Deserialize, Serialize};

use super::SettingsError;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Clipboard backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    #[default]
    Auto,
    System,
    Osc52,
}

impl ClipboardBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "auto" => Some(ClipboardBackend::Auto),
            "system" => Some(ClipboardBackend::System),
            "osc52" => Some(ClipboardBackend::Osc52),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            ClipboardBackend::Auto => "auto",
            ClipboardBackend::System => "system",
            ClipboardBackend::Osc52 => "osc52",
        }
    }
}

/// Root settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master switch; when off, inbound messages are ignored
    pub enabled: bool,
    pub api_key: String,
    pub model: String,
    /// Extra instructions appended to the built-in prompt
    pub custom_prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// How many recent messages are sent along as conversation context
    pub context_messages: usize,
    /// OpenAI-compatible endpoint override (Ollama, Groq, proxies)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Seconds to wait for suggestions before giving up
    pub timeout_secs: u64,
    /// Show canned replies when the model answer cannot be parsed
    pub fallback_replies: bool,
    /// Put the first suggestion into the composer as soon as it arrives
    pub auto_insert: bool,
    /// Send the first suggestion immediately (implies auto_insert)
    pub auto_send: bool,
    pub clipboard: ClipboardBackend,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            enabled: true,
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            custom_prompt: String::new(),
            temperature: 0.7,
            max_tokens: 500,
            context_messages: 5,
            base_url: None,
            timeout_secs: 30,
            fallback_replies: true,
            auto_insert: false,
            auto_send: false,
            clipboard: ClipboardBackend::Auto,
        }
    }
}

/// Keys accepted by `replykit settings set`
pub const SETTING_KEYS: &[&str] = &[
    "enabled",
    "api_key",
    "model",
    "custom_prompt",
    "temperature",
    "max_tokens",
    "context_messages",
    "base_url",
    "timeout_secs",
    "fallback_replies",
    "auto_insert",
    "auto_send",
    "clipboard",
];

impl Settings {
    /// Whether an API key is present
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Model name, falling back to the default when blank
    pub fn model_or_default(&self) -> &str {
        let model = self.model.trim();
        if model.is_empty() { DEFAULT_MODEL } else { model }
    }

    /// Whether suggestions should be written into the composer on arrival
    pub fn inserts_automatically(&self) -> bool {
        self.auto_insert || self.auto_send
    }

    /// Update a single field from its textual form
    ///
    /// Text values are trimmed the same way the settings form trims them.
    /// An empty `base_url` clears the override.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let value = value.trim();
        match key {
            "enabled" => self.enabled = parse_bool(key, value)?,
            "api_key" => self.api_key = value.to_string(),
            "model" => self.model = value.to_string(),
            "custom_prompt" => self.custom_prompt = value.to_string(),
            "temperature" => self.temperature = parse_number(key, value)?,
            "max_tokens" => self.max_tokens = parse_number(key, value)?,
            "context_messages" => self.context_messages = parse_number(key, value)?,
            "base_url" => {
                self.base_url = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "timeout_secs" => self.timeout_secs = parse_number(key, value)?,
            "fallback_replies" => self.fallback_replies = parse_bool(key, value)?,
            "auto_insert" => self.auto_insert = parse_bool(key, value)?,
            "auto_send" => self.auto_send = parse_bool(key, value)?,
            "clipboard" => {
                self.clipboard =
                    ClipboardBackend::parse(value).ok_or_else(|| SettingsError::BadValue {
                        key: key.to_string(),
                        message: "expected auto, system or osc52".to_string(),
                    })?
            }
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Render settings as `key = value` lines with the API key masked
    pub fn display_lines(&self) -> Vec<String> {
        vec![
            format!("enabled = {}", self.enabled),
            format!("api_key = {}", mask_key(&self.api_key)),
            format!("model = {}", self.model),
            format!("custom_prompt = {:?}", self.custom_prompt),
            format!("temperature = {}", self.temperature),
            format!("max_tokens = {}", self.max_tokens),
            format!("context_messages = {}", self.context_messages),
            format!(
                "base_url = {}",
                self.base_url.as_deref().unwrap_or("(default)")
            ),
            format!("timeout_secs = {}", self.timeout_secs),
            format!("fallback_replies = {}", self.fallback_replies),
            format!("auto_insert = {}", self.auto_insert),
            format!("auto_send = {}", self.auto_send),
            format!("clipboard = {}", self.clipboard.as_str()),
        ]
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(SettingsError::BadValue {
            key: key.to_string(),
            message: format!("expected true or false, got `{}`", value),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| SettingsError::BadValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Mask all but the last four characters of an API key
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.is_empty() {
        return "(not set)".to_string();
    }
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}

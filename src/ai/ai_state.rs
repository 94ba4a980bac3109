//! Messages exchanged with the AI worker thread
//!
//! The controller sends [`AiRequest`]s; the worker answers each generation
//! with exactly one [`AiResponse`] carrying the same request id, which is
//! how late answers to abandoned requests are recognised and dropped.

use super::provider::Usage;
use super::suggestion::SuggestionSet;
use crate::chat::Message;
use crate::settings::Settings;

/// Everything the worker needs to produce suggestions
#[derive(Debug, Clone)]
pub struct GenerationJob {
    /// The customer message being answered
    pub message: String,
    /// Recent conversation, oldest first
    pub context: Vec<Message>,
    /// Settings snapshot taken when the request was made
    pub settings: Settings,
}

/// Request messages sent to the AI worker thread
#[derive(Debug)]
pub enum AiRequest {
    /// Generate suggestions for a message
    Generate {
        job: GenerationJob,
        /// Unique ID for this request, used to filter stale responses
        request_id: u64,
    },
    /// Cancel the request with the given ID
    Cancel { request_id: u64 },
}

/// Response messages received from the AI worker thread
#[derive(Debug)]
pub enum AiResponse {
    /// Suggestions are ready
    Suggestions {
        request_id: u64,
        set: SuggestionSet,
        usage: Option<Usage>,
    },
    /// Generation failed; `message` is shown to the operator
    Error { request_id: u64, message: String },
    /// No reply within the time budget
    TimedOut { request_id: u64, secs: u64 },
    /// The request was cancelled before it finished
    Cancelled { request_id: u64 },
}

impl AiResponse {
    pub fn request_id(&self) -> u64 {
        match self {
            AiResponse::Suggestions { request_id, .. }
            | AiResponse::Error { request_id, .. }
            | AiResponse::TimedOut { request_id, .. }
            | AiResponse::Cancelled { request_id } => *request_id,
        }
    }
}

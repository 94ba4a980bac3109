//! Reply assistant
//!
//! Turns customer messages into three candidate replies: the controller
//! decides when to ask, the worker talks to the model off the UI thread,
//! and the panel shows the result.

pub mod ai_events;
pub mod ai_render;
pub mod ai_state;
pub mod controller;
pub mod prompt;
pub mod provider;
pub mod render;
pub mod selection;
pub mod suggestion;
pub mod worker;

pub use ai_state::{AiRequest, AiResponse, GenerationJob};
pub use controller::{FailureKind, PanelView, Phase, SuggestionController, Trigger};
pub use provider::AiError;

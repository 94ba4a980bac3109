//! replykit: an operator console that drafts replies to customer chat
//! messages with an OpenAI-compatible model.

pub mod ai;
pub mod app;
pub mod chat;
pub mod clipboard;
pub mod error;
pub mod notification;
pub mod settings;

pub use error::ReplykitError;

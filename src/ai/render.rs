//! Suggestion panel rendering helpers

pub mod content;
pub mod suggestions;
pub mod text;

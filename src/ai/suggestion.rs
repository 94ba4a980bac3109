//! Suggestion module for the reply assistant
//!
//! This module provides types and parsing logic for reply suggestions.

pub mod parser;

// Re-export main types
pub use parser::{Suggestion, SuggestionKind, SuggestionSet, parse_suggestions};

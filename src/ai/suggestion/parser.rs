//! Suggestion parsing for model replies
//!
//! The model is asked to answer with a JSON object:
//! ```text
//! {
//!   "variant1": "short reply",
//!   "variant2": "detailed reply",
//!   "variant3": "friendly reply"
//! }
//! ```
//! Models often wrap that object in prose or code fences, so parsing looks
//! for the outermost `{ ... }` span rather than expecting pure JSON.

use memchr::{memchr, memrchr};
use ratatui::style::Color;
use serde::Deserialize;

use crate::ai::provider::AiError;

// =========================================================================
// Suggestion Types
// =========================================================================

/// Which of the three reply styles a suggestion is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    /// One or two sentences
    Short,
    /// Two to four sentences with extra information
    Detailed,
    /// Warm tone with a recommendation
    Friendly,
}

impl SuggestionKind {
    /// Display order in the panel
    pub const ALL: [SuggestionKind; 3] = [
        SuggestionKind::Short,
        SuggestionKind::Detailed,
        SuggestionKind::Friendly,
    ];

    /// Get the display label for this kind
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionKind::Short => "Short",
            SuggestionKind::Detailed => "Detailed",
            SuggestionKind::Friendly => "Friendly",
        }
    }

    /// Get the color for this kind
    pub fn color(&self) -> Color {
        match self {
            SuggestionKind::Short => Color::Cyan,
            SuggestionKind::Detailed => Color::Yellow,
            SuggestionKind::Friendly => Color::Green,
        }
    }
}

/// A single candidate reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub text: String,
}

impl Suggestion {
    pub fn new(kind: SuggestionKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// The three suggestions of one generation cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionSet {
    pub items: Vec<Suggestion>,
    /// True when the canned replies stand in for an unparsable answer
    pub fallback: bool,
}

impl SuggestionSet {
    /// Canned replies shown when the model answer cannot be parsed
    pub fn canned() -> Self {
        Self {
            items: vec![
                Suggestion::new(
                    SuggestionKind::Short,
                    "Thanks for reaching out! Let me check and get back to you in a few minutes 🙂",
                ),
                Suggestion::new(
                    SuggestionKind::Detailed,
                    "Hello! Thank you for your question. I'm checking all the details now and will send you a complete answer shortly.",
                ),
                Suggestion::new(
                    SuggestionKind::Friendly,
                    "Hi! Great question 😊 Give me a couple of minutes to look up the latest information and I'll tell you everything.",
                ),
            ],
            fallback: true,
        }
    }
}

// =========================================================================
// Parsing Functions
// =========================================================================

#[derive(Deserialize)]
struct Variants {
    variant1: Option<String>,
    variant2: Option<String>,
    variant3: Option<String>,
}

/// Parse the three suggestions out of a model reply
///
/// When the reply holds no usable JSON object, `fallback` decides between
/// returning [`SuggestionSet::canned`] and surfacing an [`AiError::Parse`].
pub fn parse_suggestions(content: &str, fallback: bool) -> Result<SuggestionSet, AiError> {
    match parse_variants(content) {
        Ok(items) => Ok(SuggestionSet {
            items,
            fallback: false,
        }),
        Err(e) if fallback => {
            log::warn!("Using canned replies: {}", e);
            log::debug!("Unparsable model reply: {}", content);
            Ok(SuggestionSet::canned())
        }
        Err(e) => Err(e),
    }
}

fn parse_variants(content: &str) -> Result<Vec<Suggestion>, AiError> {
    let object = find_json_object(content)
        .ok_or_else(|| AiError::Parse("no JSON object in model reply".to_string()))?;

    let variants: Variants = serde_json::from_str(object)
        .map_err(|e| AiError::Parse(format!("invalid JSON in model reply: {}", e)))?;

    let texts = [variants.variant1, variants.variant2, variants.variant3];
    let mut items = Vec::with_capacity(texts.len());
    for (index, (kind, text)) in SuggestionKind::ALL.into_iter().zip(texts).enumerate() {
        let text = text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AiError::Parse(format!("incomplete model reply: variant{} missing", index + 1))
            })?;
        items.push(Suggestion::new(kind, text));
    }
    Ok(items)
}

/// Slice from the first `{` to the last `}`, if both exist in that order
fn find_json_object(content: &str) -> Option<&str> {
    let bytes = content.as_bytes();
    let start = memchr(b'{', bytes)?;
    let end = memrchr(b'}', bytes)?;
    if end < start {
        return None;
    }
    // Both positions are ASCII bytes, so they sit on char boundaries
    Some(&content[start..=end])
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod parser_tests;

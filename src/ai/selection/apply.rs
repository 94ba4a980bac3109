//! Putting a suggestion into the operator's composer

use crate::ai::suggestion::Suggestion;

/// The message box the operator types replies into
pub trait Composer {
    /// Current draft
    fn text(&self) -> String;

    /// Replace the whole draft, cursor at the end
    fn set_text(&mut self, text: &str);

    /// Send the draft and clear the box
    ///
    /// Returns the sent text, or `None` if the draft was blank.
    fn send(&mut self) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Replace the draft only
    Insert,
    /// Replace the draft, then send it
    InsertAndSend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    /// Text placed in the composer
    pub text: String,
    /// Text actually sent, for `InsertAndSend`
    pub sent: Option<String>,
}

/// Replace the composer draft with the suggestion's text
///
/// Whatever the operator had typed is discarded.
pub fn apply_suggestion<C: Composer + ?Sized>(
    suggestion: &Suggestion,
    composer: &mut C,
    mode: ApplyMode,
) -> ApplyResult {
    composer.set_text(&suggestion.text);
    let sent = match mode {
        ApplyMode::Insert => None,
        ApplyMode::InsertAndSend => composer.send(),
    };
    log::debug!(
        "Applied {} suggestion{}",
        suggestion.label(),
        if sent.is_some() { " and sent it" } else { "" }
    );

    ApplyResult {
        text: suggestion.text.clone(),
        sent,
    }
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod apply_tests;

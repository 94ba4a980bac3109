//! Key bindings for choosing a suggestion
//!
//! Alt+1..3 picks a suggestion directly; Alt+Up/Down (or Alt+k/j) steps
//! through them, after which Enter applies the highlighted one.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::SelectionState;

/// Map Alt+digit to a zero-based suggestion index
///
/// Returns `None` for other keys and for digits beyond `count`.
pub fn handle_direct_selection(key: KeyEvent, count: usize) -> Option<usize> {
    if !key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    let digit = c.to_digit(10)? as usize;
    if digit == 0 || digit > count {
        return None;
    }
    Some(digit - 1)
}

/// Step the selection with Alt+Up/Down/k/j
///
/// Returns true if the key was a navigation key.
pub fn handle_navigation(key: KeyEvent, state: &mut SelectionState, count: usize) -> bool {
    if !key.modifiers.contains(KeyModifiers::ALT) {
        return false;
    }
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.next(count);
            true
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.previous(count);
            true
        }
        _ => false,
    }
}

/// Enter applies the highlighted suggestion, but only in navigation mode
pub fn handle_apply_selection(key: KeyEvent, state: &SelectionState) -> Option<usize> {
    if key.code != KeyCode::Enter || !key.modifiers.is_empty() || !state.is_navigating() {
        return None;
    }
    state.selected()
}

#[cfg(test)]
#[path = "keybindings_tests.rs"]
mod keybindings_tests;

//! Key handling for the suggestion panel
//!
//! Keys are translated into [`PanelAction`]s. Selection and visibility
//! change here; touching the composer, clipboard or worker is left to the
//! caller.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::controller::SuggestionController;
use super::selection::keybindings::{
    handle_apply_selection, handle_direct_selection, handle_navigation,
};

/// What the console should do after a panel key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Panel shown or hidden
    Toggled,
    /// Highlight moved; nothing else to do
    Navigated,
    /// Put suggestion `index` in the composer
    Insert(usize),
    /// Put suggestion `index` in the composer and send it
    InsertAndSend(usize),
    /// Copy suggestion `index` to the clipboard
    Copy(usize),
    /// Ask for fresh suggestions for the latest customer message
    Regenerate,
}

fn ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Handle a key aimed at the panel
///
/// Returns `None` when the key is not a panel key, so the composer gets it.
pub fn handle_panel_key(key: KeyEvent, controller: &mut SuggestionController) -> Option<PanelAction> {
    if ctrl(&key, 'a') {
        controller.toggle();
        return Some(PanelAction::Toggled);
    }

    if !controller.visible {
        return None;
    }

    if ctrl(&key, 'r') {
        return Some(PanelAction::Regenerate);
    }

    let count = controller.suggestions().map_or(0, |set| set.items.len());
    if count == 0 {
        return None;
    }

    if let Some(index) = handle_direct_selection(key, count) {
        controller.selection.select(index);
        return Some(PanelAction::Insert(index));
    }

    if handle_navigation(key, &mut controller.selection, count) {
        return Some(PanelAction::Navigated);
    }

    if let Some(index) = handle_apply_selection(key, &controller.selection) {
        controller.selection.select(index);
        return Some(PanelAction::Insert(index));
    }

    if ctrl(&key, 's') {
        return controller
            .selection
            .resolved(count)
            .map(PanelAction::InsertAndSend);
    }

    if ctrl(&key, 'y') {
        return controller.selection.resolved(count).map(PanelAction::Copy);
    }

    None
}

#[cfg(test)]
#[path = "ai_events_tests.rs"]
mod ai_events_tests;

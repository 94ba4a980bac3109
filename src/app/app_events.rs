use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::{Duration, Instant};

use super::app_state::App;
use crate::ai::ai_events::{PanelAction, handle_panel_key};
use crate::ai::selection::{ApplyMode, Composer, apply_suggestion};
use crate::clipboard::copy_to_clipboard;

impl App {
    /// Wait up to `timeout` for a terminal event and handle it
    pub fn handle_events(&mut self, timeout: Duration) -> io::Result<()> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        match event::read()? {
            // Check that it's a key press event to avoid duplicates
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event, Instant::now());
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle a key press
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        if self.handle_global_keys(key) {
            return;
        }

        if let Some(action) = handle_panel_key(key, &mut self.controller) {
            self.run_panel_action(action, now);
            return;
        }

        self.handle_composer_key(key);
    }

    /// Returns true if the key was handled
    fn handle_global_keys(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                true
            }
            KeyCode::Esc => {
                if self.controller.cancel_in_flight() {
                    self.notification.show("Generation cancelled");
                } else {
                    self.controller.selection.clear();
                }
                true
            }
            _ => false,
        }
    }

    fn run_panel_action(&mut self, action: PanelAction, now: Instant) {
        match action {
            PanelAction::Toggled | PanelAction::Navigated => {}
            PanelAction::Insert(index) => self.apply_at(index, ApplyMode::Insert),
            PanelAction::InsertAndSend(index) => self.apply_at(index, ApplyMode::InsertAndSend),
            PanelAction::Copy(index) => self.copy_at(index),
            PanelAction::Regenerate => self.regenerate(now),
        }
    }

    fn apply_at(&mut self, index: usize, mode: ApplyMode) {
        let Some(suggestion) = self
            .controller
            .suggestions()
            .and_then(|set| set.items.get(index))
            .cloned()
        else {
            return;
        };

        let result = apply_suggestion(&suggestion, &mut self.composer, mode);
        match result.sent {
            Some(sent) => {
                self.record_sent(sent);
                self.notification
                    .show(format!("Sent {} reply", suggestion.label()));
            }
            None => self
                .notification
                .show(format!("Inserted {} reply", suggestion.label())),
        }
    }

    fn copy_at(&mut self, index: usize) {
        let Some(suggestion) = self
            .controller
            .suggestions()
            .and_then(|set| set.items.get(index))
        else {
            return;
        };

        let label = suggestion.label();
        match copy_to_clipboard(&suggestion.text, self.settings.clipboard) {
            Ok(()) => self.notification.show(format!("Copied {label} reply")),
            Err(e) => {
                log::warn!("Copy failed: {}", e);
                self.notification.show_error(format!("Copy failed: {e}"));
            }
        }
    }

    fn handle_composer_key(&mut self, key: KeyEvent) {
        // Plain Enter sends; Shift+Enter or Alt+Enter add a line break
        if key.code == KeyCode::Enter && key.modifiers.is_empty() {
            if let Some(text) = self.composer.send() {
                self.record_sent(text);
            }
            return;
        }
        if key.code == KeyCode::Enter {
            self.composer.input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
            return;
        }
        self.composer.input(key);
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;

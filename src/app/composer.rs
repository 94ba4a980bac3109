use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};
use tui_textarea::{CursorMove, TextArea};

use crate::ai::selection::Composer;

/// The operator's message box
pub struct ComposerBox {
    textarea: TextArea<'static>,
}

impl ComposerBox {
    pub fn new() -> Self {
        Self {
            textarea: styled(TextArea::default()),
        }
    }

    /// Forward a key to the text area; returns true if the text changed
    pub fn input(&mut self, key: KeyEvent) -> bool {
        self.textarea.input(key)
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(|line| line.is_empty())
    }
}

impl Default for ComposerBox {
    fn default() -> Self {
        Self::new()
    }
}

fn styled(mut textarea: TextArea<'static>) -> TextArea<'static> {
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Message ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    // Remove default underline from cursor line
    textarea.set_cursor_line_style(Style::default());
    textarea
}

impl Composer for ComposerBox {
    fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    fn set_text(&mut self, text: &str) {
        let lines: Vec<String> = text.lines().map(String::from).collect();
        let mut textarea = styled(TextArea::new(lines));
        textarea.move_cursor(CursorMove::Bottom);
        textarea.move_cursor(CursorMove::End);
        self.textarea = textarea;
    }

    fn send(&mut self) -> Option<String> {
        let text = self.text().trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.set_text("");
        Some(text)
    }
}

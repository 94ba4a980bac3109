use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app_state::App;
use crate::ai::ai_render::render_panel;
use crate::ai::render::text::wrap_text;
use crate::chat::{Message, Role};
use crate::notification::render_notification;

const IDLE_HINT: &str = "Enter send | Ctrl+A replies | Ctrl+R regenerate | Esc cancel | Ctrl+Q quit";

const COMPOSER_HEIGHT: u16 = 5;

impl App {
    pub fn render(&self, frame: &mut Frame) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());

        let (chat_area, panel_area) = if self.controller.visible {
            let [chat, panel] =
                Layout::horizontal([Constraint::Min(20), Constraint::Percentage(40)])
                    .areas(main_area);
            (chat, Some(panel))
        } else {
            (main_area, None)
        };

        let [transcript_area, composer_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(COMPOSER_HEIGHT)])
                .areas(chat_area);

        self.render_transcript(frame, transcript_area);
        frame.render_widget(self.composer.textarea(), composer_area);

        if let Some(panel_area) = panel_area {
            render_panel(&self.controller, self.settings.model_or_default(), frame, panel_area);
        }

        render_notification(&self.notification, IDLE_HINT, frame, status_area);
    }

    fn render_transcript(&self, frame: &mut Frame, area: Rect) {
        let title = match self.transcript.chat_id() {
            Some(id) => format!(" Chat {id} "),
            None => " Chat ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);

        if self.transcript.is_empty() {
            let hint = Paragraph::new(Line::from(Span::styled(
                "No messages yet. Waiting for the chat feed.",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            frame.render_widget(hint, area);
            return;
        }

        let mut lines: Vec<Line> = self
            .transcript
            .messages()
            .iter()
            .flat_map(|message| message_lines(message, inner.width as usize))
            .collect();

        // Keep the newest messages in view
        let visible = inner.height as usize;
        if lines.len() > visible {
            lines.drain(..lines.len() - visible);
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Lines for one message: speaker on the first line, wrapped text after it
fn message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
    let speaker_style = match message.role {
        Role::Client => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Role::Operator => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    };
    let prefix = format!("{}: ", message.role.speaker());
    let indent = " ".repeat(prefix.len());
    let text_width = width.saturating_sub(prefix.len()).max(1);

    wrap_text(&message.text, text_width)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let lead = if i == 0 {
                Span::styled(prefix.clone(), speaker_style)
            } else {
                Span::raw(indent.clone())
            };
            Line::from(vec![lead, Span::raw(text)])
        })
        .collect()
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;

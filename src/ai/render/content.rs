//! Content for the non-result panel states

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use crate::ai::controller::{FailureKind, PanelView};
use crate::ai::render::text::wrap_text;

fn heading(icon: &'static str, title: &'static str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(icon, Style::default().fg(color)),
        Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn wrapped(text: &str, max_width: u16, style: Style) -> Vec<Line<'static>> {
    wrap_text(text, max_width as usize)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, style)))
        .collect()
}

/// Build the panel text for every view except `Ready`
pub fn build_content(view: &PanelView, max_width: u16) -> Text<'static> {
    let gray = Style::default().fg(Color::Gray);
    let mut lines: Vec<Line> = Vec::new();

    match view {
        PanelView::Waiting => {
            lines.extend(wrapped(
                "Waiting for a customer message.",
                max_width,
                gray,
            ));
            lines.push(Line::from(""));
            lines.extend(wrapped(
                "When the customer writes, three reply options will appear here.",
                max_width,
                gray,
            ));
        }
        PanelView::Loading { message } => {
            lines.push(heading("⏳ ", "Generating replies...", Color::Yellow));
            lines.push(Line::from(""));
            lines.extend(wrapped(
                &format!("\"{}\"", message),
                max_width,
                Style::default().fg(Color::DarkGray),
            ));
        }
        PanelView::Failed { kind, message } => {
            let red = Style::default().fg(Color::Red);
            match kind {
                FailureKind::Config => {
                    lines.push(heading("⚙ ", "Setup Required", Color::Yellow));
                    lines.push(Line::from(""));
                    lines.extend(wrapped(message, max_width, gray));
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "replykit settings set api_key sk-...",
                        Style::default().fg(Color::Cyan),
                    )));
                }
                FailureKind::Timeout => {
                    lines.push(heading("⌛ ", "Timed out", Color::Red));
                    lines.push(Line::from(""));
                    lines.extend(wrapped(message, max_width, red));
                    lines.push(Line::from(""));
                    lines.extend(wrapped("Ctrl+R to try again", max_width, gray));
                }
                FailureKind::Remote => {
                    lines.push(heading("⚠ ", "Error", Color::Red));
                    lines.push(Line::from(""));
                    lines.extend(wrapped(message, max_width, red));
                    lines.push(Line::from(""));
                    lines.extend(wrapped("Ctrl+R to try again", max_width, gray));
                }
            }
        }
        // Suggestions are drawn as separate widgets
        PanelView::Ready(_) => {}
    }

    Text::from(lines)
}

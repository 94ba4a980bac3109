//! Line building for the three suggestions

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::ai::render::text::wrap_text;
use crate::ai::suggestion::SuggestionSet;

/// Indent of the reply text under its label
const TEXT_INDENT: &str = "   ";

/// Rendered lines of one suggestion
#[derive(Debug, Clone)]
pub struct SuggestionBlock {
    pub lines: Vec<Line<'static>>,
    pub selected: bool,
}

/// Build one block per suggestion: a numbered label line, then the
/// reply text wrapped under it
pub fn suggestion_blocks(
    set: &SuggestionSet,
    selected: Option<usize>,
    max_width: u16,
) -> Vec<SuggestionBlock> {
    let text_width = max_width.saturating_sub(TEXT_INDENT.len() as u16) as usize;

    set.items
        .iter()
        .enumerate()
        .map(|(i, suggestion)| {
            let is_selected = selected == Some(i);
            let number_style = if is_selected {
                Style::default().fg(Color::Black).bg(Color::DarkGray)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let text_style = if is_selected {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{}. ", i + 1), number_style),
                Span::styled(
                    suggestion.label(),
                    Style::default()
                        .fg(suggestion.kind.color())
                        .add_modifier(Modifier::BOLD),
                ),
            ])];
            lines.extend(
                wrap_text(&suggestion.text, text_width)
                    .into_iter()
                    .map(|line| Line::from(Span::styled(format!("{TEXT_INDENT}{line}"), text_style))),
            );

            SuggestionBlock {
                lines,
                selected: is_selected,
            }
        })
        .collect()
}

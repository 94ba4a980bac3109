//! Suggestion panel rendering
//!
//! Draws the reply-suggestion panel on the right of the console: waiting,
//! loading and error states as text, results as one widget per suggestion
//! so the highlighted one gets a full-width background.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::controller::{PanelView, SuggestionController};
use super::render::content::build_content;
use super::render::suggestions::suggestion_blocks;
use super::suggestion::SuggestionSet;

/// Render the suggestion panel into `area`
///
/// `model` is shown in the top-right corner of the border.
pub fn render_panel(controller: &SuggestionController, model: &str, frame: &mut Frame, area: Rect) {
    if !controller.visible || area.width < 4 || area.height < 3 {
        return;
    }

    frame.render_widget(Clear, area);
    let block = panel_block(controller, model, area.width);

    match controller.view() {
        PanelView::Ready(set) => {
            frame.render_widget(block.clone(), area);
            let inner = block.inner(area);
            render_suggestions(controller, set, frame, inner);
        }
        view => {
            let content = build_content(view, area.width.saturating_sub(4));
            let paragraph = Paragraph::new(content)
                .wrap(Wrap { trim: false })
                .block(block);
            frame.render_widget(paragraph, area);
        }
    }
}

fn panel_block(controller: &SuggestionController, model: &str, width: u16) -> Block<'static> {
    let mut title = vec![
        Span::raw(" "),
        Span::styled(
            "Replies",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if controller.generations() > 0 {
        title.push(Span::styled(
            format!(" #{}", controller.generations()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let (Some(_), Some(usage)) = (controller.suggestions(), controller.last_usage()) {
        title.push(Span::styled(
            format!(" {} tokens", usage.total_tokens),
            Style::default().fg(Color::DarkGray),
        ));
    }
    title.push(Span::raw(" "));

    // Model name gets at most half the border
    let max_model_width = (width / 2).saturating_sub(2) as usize;
    let model_display = if model.chars().count() > max_model_width {
        let keep = max_model_width.saturating_sub(3);
        format!("{}...", model.chars().take(keep).collect::<String>())
    } else {
        model.to_string()
    };
    let model_title = Line::from(vec![
        Span::raw(" "),
        Span::styled(model_display, Style::default().fg(Color::Blue)),
        Span::raw(" "),
    ]);

    let hints = if controller.suggestions().is_some() {
        " Alt+1-3 insert | Ctrl+S send | Ctrl+Y copy "
    } else {
        " Ctrl+A hide "
    };

    Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title))
        .title_top(model_title.alignment(Alignment::Right))
        .title_bottom(
            Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Center),
        )
        .border_style(Style::default().fg(Color::Green))
}

fn render_suggestions(
    controller: &SuggestionController,
    set: &SuggestionSet,
    frame: &mut Frame,
    inner: Rect,
) {
    let mut area = inner;
    if set.fallback && area.height > 2 {
        let note = Paragraph::new(Line::from(Span::styled(
            "Model reply unreadable, showing canned replies",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )))
        .wrap(Wrap { trim: true });
        frame.render_widget(note, Rect { height: 1, ..area });
        area.y += 2;
        area.height -= 2;
    }

    let blocks = suggestion_blocks(set, controller.selection.selected(), area.width);

    // One chunk per suggestion with a spacer row between them
    let mut constraints = Vec::with_capacity(blocks.len() * 2);
    for block in &blocks {
        constraints.push(Constraint::Min(block.lines.len() as u16));
        constraints.push(Constraint::Length(1));
    }
    constraints.pop();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (block, chunk) in blocks.into_iter().zip(chunks.iter().step_by(2)) {
        if chunk.height == 0 {
            continue;
        }
        let style = if block.selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(block.lines).style(style), *chunk);
    }
}

#[cfg(test)]
#[path = "ai_render_tests.rs"]
mod ai_render_tests;

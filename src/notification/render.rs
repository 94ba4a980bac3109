use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::state::{NotificationKind, NotificationState};

/// Draw the current notification on a single status row
///
/// Falls back to `idle_hint` when nothing is being shown.
pub fn render_notification(state: &NotificationState, idle_hint: &str, frame: &mut Frame, area: Rect) {
    let line = match state.current() {
        Some(notification) => {
            let color = match notification.kind {
                NotificationKind::Info => Color::Green,
                NotificationKind::Warning => Color::Yellow,
                NotificationKind::Error => Color::Red,
            };
            Line::from(vec![
                Span::raw(" "),
                Span::styled(notification.message.clone(), Style::default().fg(color)),
            ])
        }
        None => Line::from(Span::styled(
            format!(" {idle_hint}"),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

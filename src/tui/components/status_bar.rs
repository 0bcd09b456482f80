//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::App;
use crate::websocket::ConnectionState;

/// Renders the status bar: live channel state, bell state and trigger count.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let status_color = match app.connection_state {
        ConnectionState::Connected => Color::Green,
        ConnectionState::Connecting => Color::Yellow,
        ConnectionState::Disconnected => Color::Red,
    };

    let sound_span = if app.sound_enabled {
        Span::styled(" Sound On ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" Sound Off ", Style::default().fg(Color::DarkGray))
    };

    let triggered_span = if app.triggered_alerts.is_empty() {
        Span::raw("")
    } else {
        Span::styled(
            format!(" {} triggered ", app.triggered_alerts.len()),
            Style::default().fg(Color::Magenta),
        )
    };

    let line = Line::from(vec![
        Span::styled(" ● ", Style::default().fg(status_color)),
        Span::styled(
            format!("{} ", app.connection_state.label()),
            Style::default().fg(status_color),
        ),
        Span::raw("│"),
        sound_span,
        Span::raw("│"),
        triggered_span,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

//! Alerts tab layout and rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::models::Alert;
use crate::tui::app::{AlertField, App, Focus, Mode};
use crate::tui::components::{input_field, notifications, status_bar, tab_bar};
use crate::tui::format;

/// Renders the Alerts tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Tab bar
            Constraint::Length(1),  // Status bar
            Constraint::Length(3),  // Create alert form
            Constraint::Min(6),     // Alerts table
            Constraint::Length(8),  // Triggered alerts
            Constraint::Length(1),  // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);
    render_alerts(frame, main_layout[3], app);
    render_triggered(frame, main_layout[4], app);
    render_form(frame, main_layout[2], area, app);
    render_keybindings(frame, main_layout[5], app);
    notifications::render(frame, area, app);
}

/// Target column, shown as a dollar amount for every alert type.
fn target_label(alert: &Alert) -> String {
    format::money(Some(alert.target_value))
}

/// Renders the three-field create-alert form.
fn render_form(frame: &mut Frame, area: Rect, bounds: Rect, app: &App) {
    let fields = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    let editing = |field| app.mode == Mode::Insert && app.focus == Focus::AlertForm(field);
    let focused = |field| app.focus == Focus::AlertForm(field);

    input_field::render(
        frame,
        fields[0],
        "Symbol",
        &app.alert_form.symbol,
        focused(AlertField::Symbol),
        editing(AlertField::Symbol),
    );

    let type_style = if editing(AlertField::Type) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let type_para = Paragraph::new(format!("◀ {} ▶", app.alert_form.alert_type.as_str()))
        .block(
            Block::default()
                .title(" Alert Type ")
                .borders(Borders::ALL)
                .border_style(type_style),
        );
    frame.render_widget(type_para, fields[1]);

    input_field::render(
        frame,
        fields[2],
        "Target Value",
        &app.alert_form.target,
        focused(AlertField::Target),
        editing(AlertField::Target),
    );

    if focused(AlertField::Symbol) {
        input_field::render_suggestions(frame, fields[0], bounds, &app.suggestions, app.suggestion_index);
    }
}

fn header(titles: &[&'static str]) -> Row<'static> {
    Row::new(titles.to_vec()).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
}

fn bordered(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
}

/// Renders configured alerts.
fn render_alerts(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Alerts;
    let block = bordered(" Alerts ", is_focused);

    if app.alerts.is_empty() {
        let para = Paragraph::new("No alerts configured")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    let rows = app.alerts.iter().map(|alert| {
        let status = if alert.triggered {
            Cell::from("Triggered").style(Style::default().fg(Color::Magenta))
        } else {
            Cell::from("Active").style(Style::default().fg(Color::Green))
        };
        Row::new([
            Cell::from(alert.symbol.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(alert.type_label()),
            Cell::from(target_label(alert)),
            status,
            Cell::from(
                alert
                    .created_at
                    .as_deref()
                    .map_or_else(|| format::NOT_AVAILABLE.to_string(), format::date_label),
            ),
        ])
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header(&["Symbol", "Type", "Target", "Status", "Created"]))
        .block(block)
        .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));

    let mut state = TableState::default().with_selected(is_focused.then_some(app.selected_alert));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Renders the triggered alerts history.
fn render_triggered(frame: &mut Frame, area: Rect, app: &App) {
    let block = bordered(" Triggered Alerts ", false);

    if app.triggered_alerts.is_empty() {
        let para = Paragraph::new("No triggered alerts")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    let rows = app.triggered_alerts.iter().map(|alert| {
        Row::new([
            Cell::from(alert.symbol.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(alert.type_label()),
            Cell::from(target_label(alert)),
            Cell::from(format::money(alert.triggered_price)),
            Cell::from(format::datetime_label(alert.triggered_at.as_deref())),
        ])
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Min(19),
    ];

    let table = Table::new(rows, widths)
        .header(header(&["Symbol", "Type", "Target", "Price", "Triggered At"]))
        .block(block);
    frame.render_widget(table, area);
}

/// Renders the keybindings help line, or the pending confirmation prompt.
fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let line = match (app.mode, &app.pending_confirm) {
        (Mode::Confirm, Some(pending)) => Line::from(vec![
            Span::styled(pending.prompt(), Style::default().fg(Color::Yellow)),
            Span::styled(" [y]es [n]o", Style::default().fg(Color::DarkGray)),
        ]),
        (Mode::Insert, _) => Line::styled(
            "[Tab]next field [←→]alert type [Enter]create [Esc]cancel",
            Style::default().fg(Color::DarkGray),
        ),
        _ => Line::styled(
            "[n]ew alert [d]elete [r]efresh [s]ound [j/k]select [Tab]switch tab [q]uit",
            Style::default().fg(Color::DarkGray),
        ),
    };

    frame.render_widget(Paragraph::new(line), area);
}

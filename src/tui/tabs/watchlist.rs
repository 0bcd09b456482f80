//! Watchlist tab layout and rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::tui::app::{App, Focus, Mode, Tone, ToneCell};
use crate::tui::components::{input_field, notifications, status_bar, tab_bar};

/// Summary fields shown first, in this order; any others follow.
const SUMMARY_ORDER: [&str; 4] = ["total_value", "daily_change", "daily_change_percent", "total_stocks"];

/// Renders the Watchlist tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Length(3), // Market summary
            Constraint::Length(3), // Add stock
            Constraint::Min(5),    // Stocks table
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);
    render_summary(frame, main_layout[2], app);
    render_stocks(frame, main_layout[4], app);

    input_field::render(
        frame,
        main_layout[3],
        "Add Stock",
        &app.stock_form,
        app.focus == Focus::StockForm,
        app.focus == Focus::StockForm && app.mode == Mode::Insert,
    );
    if app.focus == Focus::StockForm {
        input_field::render_suggestions(
            frame,
            main_layout[3],
            area,
            &app.suggestions,
            app.suggestion_index,
        );
    }

    render_keybindings(frame, main_layout[5], app);
    notifications::render(frame, area, app);
}

/// Orders summary keys: known fields first, the rest alphabetically.
fn summary_keys(app: &App) -> Vec<&str> {
    let mut keys: Vec<&str> = SUMMARY_ORDER
        .iter()
        .copied()
        .filter(|k| app.summary.contains_key(*k))
        .collect();
    keys.extend(
        app.summary
            .keys()
            .map(String::as_str)
            .filter(|k| !SUMMARY_ORDER.contains(k)),
    );
    keys
}

/// `daily_change_percent` → `Daily Change Percent`.
fn summary_label(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the market summary cards.
fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let keys = summary_keys(app);
    if keys.is_empty() {
        let block = Block::default()
            .title(" Market Summary ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let para = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, keys.len() as u32); keys.len()])
        .split(area);

    for (key, card) in keys.iter().zip(cards.iter()) {
        let value = app.summary.get(*key).map_or("", String::as_str);
        let block = Block::default()
            .title(format!(" {} ", summary_label(key)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let para = Paragraph::new(Span::styled(
            value,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .block(block);
        frame.render_widget(para, *card);
    }
}

fn tone_cell(cell: &ToneCell) -> Cell<'_> {
    let color = match cell.tone {
        Tone::Positive => Color::Green,
        Tone::Negative => Color::Red,
        Tone::Neutral => Color::DarkGray,
    };
    Cell::from(cell.text.as_str()).style(Style::default().fg(color))
}

/// Renders the stocks table.
fn render_stocks(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Stocks;
    let block = Block::default()
        .title(" Watchlist ")
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    if app.stocks.is_empty() {
        let para = Paragraph::new("No stocks in watchlist")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    let header = Row::new([
        "Symbol", "Exchange", "Name", "Price", "Change", "Change %", "Volume", "Market Cap", "Updated",
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows = app.stocks.iter().map(|row| {
        Row::new([
            Cell::from(row.symbol.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(row.exchange.as_str()),
            Cell::from(row.name.as_str()),
            Cell::from(row.price.as_str()),
            tone_cell(&row.change),
            tone_cell(&row.change_percent),
            Cell::from(row.volume.as_str()),
            Cell::from(row.market_cap.as_str()),
            Cell::from(row.last_updated.as_str()).style(Style::default().fg(Color::DarkGray)),
        ])
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Min(12),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));

    let mut state = TableState::default().with_selected(is_focused.then_some(app.selected_stock));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Renders the keybindings help line, or the pending confirmation prompt.
fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let line = match (app.mode, &app.pending_confirm) {
        (Mode::Confirm, Some(pending)) => Line::from(vec![
            Span::styled(pending.prompt(), Style::default().fg(Color::Yellow)),
            Span::styled(" [y]es [n]o", Style::default().fg(Color::DarkGray)),
        ]),
        (Mode::Insert, _) => Line::styled(
            "[Enter]add [↑↓]suggestions [Esc]cancel",
            Style::default().fg(Color::DarkGray),
        ),
        _ => Line::styled(
            "[a]dd [d]elete [n]ew alert [c]hart [r]efresh [s]ound [j/k]select [Tab]switch tab [q]uit",
            Style::default().fg(Color::DarkGray),
        ),
    };

    frame.render_widget(Paragraph::new(line), area);
}

//! Bordered single-line input and its suggestion dropdown.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::models::SymbolMatch;
use crate::tui::input::TextInput;

/// Renders `input` inside a titled box, placing the terminal cursor when
/// `editing`.
pub fn render(frame: &mut Frame, area: Rect, title: &str, input: &TextInput, focused: bool, editing: bool) {
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(input.as_str()), inner);

    if editing {
        let offset = cursor_column(input).min(inner.width.saturating_sub(1) as usize);
        frame.set_cursor_position((inner.x + offset as u16, inner.y));
    }
}

/// Display column of the cursor, counting wide characters as two cells.
pub fn cursor_column(input: &TextInput) -> usize {
    let before: String = input.as_str().chars().take(input.cursor()).collect();
    before.width()
}

/// Draws symbol suggestions as a dropdown directly below `anchor`.
pub fn render_suggestions(
    frame: &mut Frame,
    anchor: Rect,
    bounds: Rect,
    suggestions: &[SymbolMatch],
    selected: Option<usize>,
) {
    if suggestions.is_empty() {
        return;
    }

    let y = anchor.y + anchor.height;
    let available = bounds.y.saturating_add(bounds.height).saturating_sub(y);
    let height = (suggestions.len() as u16 + 2).min(available);
    if height < 3 {
        return;
    }
    let area = Rect::new(anchor.x, y, anchor.width, height);

    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|s| ListItem::new(format!("{:<8} {} ({})", s.symbol, s.name, s.exchange)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default().with_selected(selected);
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

//! Main UI rendering coordinator.

use ratatui::Frame;

use super::app::{App, Tab};
use super::tabs::{alerts, watchlist};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_tab() {
        Tab::Watchlist => watchlist::render(frame, app),
        Tab::Alerts => alerts::render(frame, app),
    }
}

//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use rust_decimal::Decimal;
use tokio::sync::mpsc;

use crate::models::{Alert, InboundMessage, MarketSummary, NewAlert, Severity, Stock, SymbolMatch};
use crate::websocket::ConnectionState;

use super::app::{AlertField, App, Focus, MIN_SEARCH_LEN, Mode, PendingConfirm, Tab};
use super::dispatch::dispatch;

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
    /// The terminal window regained focus.
    FocusGained,
}

/// Periodic background refreshes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshTask {
    /// Fetch the market summary while the live channel is up.
    SummaryRefresh,
    /// Reload everything while the live channel is down.
    Resync,
}

/// REST mutation whose outcome is reported back to the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    AddStock(String),
    CreateAlert,
    RemoveStock(String),
    RemoveAlert,
}

impl ActionKind {
    fn success_text(&self) -> String {
        match self {
            ActionKind::AddStock(symbol) => format!("Added {symbol} to watchlist"),
            ActionKind::CreateAlert => "Alert created successfully".to_string(),
            ActionKind::RemoveStock(symbol) => format!("Removed {symbol} from watchlist"),
            ActionKind::RemoveAlert => "Alert removed successfully".to_string(),
        }
    }

    fn failure_text(&self) -> &'static str {
        match self {
            ActionKind::AddStock(_) => "Failed to add stock",
            ActionKind::CreateAlert => "Failed to create alert",
            ActionKind::RemoveStock(_) => "Failed to remove stock",
            ActionKind::RemoveAlert => "Failed to remove alert",
        }
    }

    /// Table to reload after a successful mutation.
    fn refresh(&self) -> Action {
        match self {
            ActionKind::AddStock(_) | ActionKind::RemoveStock(_) => Action::RefreshStocks,
            ActionKind::CreateAlert | ActionKind::RemoveAlert => Action::RefreshAlerts,
        }
    }
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// Live channel is opening a connection.
    Connecting,
    /// Live channel connected.
    Connected,
    /// Live channel disconnected.
    Disconnected,
    /// Live channel transport error.
    TransportError(String),
    /// Decoded live channel message.
    Inbound(InboundMessage),

    /// A periodic refresh fired.
    Refresh(RefreshTask),

    /// `GET /api/stocks` returned.
    StocksLoaded(Vec<Stock>),
    /// `GET /api/alerts` returned.
    AlertsLoaded(Vec<Alert>),
    /// `GET /api/triggered_alerts` returned.
    TriggeredAlertsLoaded(Vec<Alert>),
    /// `GET /api/market_summary` returned.
    SummaryLoaded(MarketSummary),
    /// Symbol search results for `query`.
    Suggestions {
        query: String,
        matches: Vec<SymbolMatch>,
    },
    /// A mutation finished. `Err(Some(_))` carries the server's reason.
    ActionDone {
        kind: ActionKind,
        result: Result<(), Option<String>>,
    },
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            let polled = tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await;

            let event = match polled {
                Ok(Some(CrosstermEvent::Key(key))) => Event::Key(key),
                Ok(Some(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                Ok(Some(CrosstermEvent::FocusGained)) => Event::FocusGained,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(Message::Input(event)).is_err() {
                break;
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Spawns a task that sends `task` every `period`, starting one period from now.
///
/// Whether the refresh does anything is decided by [`update`] when the
/// message is handled.
pub fn spawn_refresh_timer(tx: mpsc::UnboundedSender<Message>, task: RefreshTask, period: Duration) {
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        loop {
            interval.tick().await;
            if tx.send(Message::Refresh(task)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),

        Message::Connecting => {
            app.connection_state = ConnectionState::Connecting;
            None
        }
        Message::Connected => {
            app.connection_state = ConnectionState::Connected;
            None
        }
        Message::Disconnected => {
            app.connection_state = ConnectionState::Disconnected;
            None
        }
        Message::TransportError(_) => {
            app.notify(
                "Connection Error",
                "Failed to connect to real-time updates",
                Severity::Error,
            );
            None
        }
        Message::Inbound(inbound) => dispatch(app, inbound),

        Message::Refresh(RefreshTask::SummaryRefresh) => {
            (app.connection_state == ConnectionState::Connected).then_some(Action::RefreshSummary)
        }
        Message::Refresh(RefreshTask::Resync) => {
            (app.connection_state != ConnectionState::Connected).then_some(Action::LoadAll)
        }

        Message::StocksLoaded(stocks) => {
            app.set_stocks(&stocks);
            None
        }
        Message::AlertsLoaded(alerts) => {
            app.set_alerts(alerts);
            None
        }
        Message::TriggeredAlertsLoaded(alerts) => {
            app.set_triggered_alerts(alerts);
            None
        }
        Message::SummaryLoaded(summary) => {
            app.update_summary(&summary);
            None
        }
        Message::Suggestions { query, matches } => {
            app.set_suggestions(&query, matches);
            None
        }
        Message::ActionDone { kind, result } => handle_action_done(app, kind, result),
    }
}

/// Actions that require external handling (REST calls).
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Reload stocks, alerts, triggered alerts and the summary.
    LoadAll,
    RefreshStocks,
    RefreshAlerts,
    RefreshTriggeredAlerts,
    RefreshSummary,
    /// Add an (upper-cased) symbol to the watchlist.
    AddStock(String),
    CreateAlert(NewAlert),
    RemoveStock(String),
    RemoveAlert(u64),
    /// Look up symbols matching the query.
    SearchSymbols(String),
}

fn handle_action_done(app: &mut App, kind: ActionKind, result: Result<(), Option<String>>) -> Option<Action> {
    match result {
        Ok(()) => {
            app.notify("Success", kind.success_text(), Severity::Success);
            match kind {
                ActionKind::AddStock(_) => app.stock_form.clear(),
                ActionKind::CreateAlert => app.alert_form.reset(),
                ActionKind::RemoveStock(_) | ActionKind::RemoveAlert => {}
            }
            Some(kind.refresh())
        }
        Err(reason) => {
            let message = reason
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| kind.failure_text().to_string());
            app.notify("Error", message, Severity::Error);
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_notifications();
            None
        }
        Event::FocusGained => Some(Action::LoadAll),
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Global keys (work in any mode)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Char('q') if key.modifiers.is_empty() && app.mode == Mode::Normal => {
            app.should_quit = true;
            return None;
        }
        _ => {}
    }

    // Mode-specific handling
    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
        Mode::Confirm => handle_confirm_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        // Tab navigation
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_tab();
            } else {
                app.next_tab();
            }
            None
        }
        KeyCode::BackTab => {
            app.previous_tab();
            None
        }

        KeyCode::Char('r') => Some(Action::LoadAll),
        KeyCode::Char('s') => {
            app.toggle_sound();
            None
        }

        _ => match app.current_tab() {
            Tab::Watchlist => handle_watchlist_keys(app, key),
            Tab::Alerts => handle_alerts_keys(app, key),
        },
    }
}

/// Handles keys for the Watchlist tab.
fn handle_watchlist_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.selected_stock + 1 < app.stocks.len() {
                app.selected_stock += 1;
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.selected_stock = app.selected_stock.saturating_sub(1);
            None
        }

        // Add stock
        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.focus = Focus::StockForm;
            app.mode = Mode::Insert;
            None
        }

        // New alert for the selected symbol
        KeyCode::Char('n') => {
            let symbol = app.selected_stock_symbol().map(str::to_string);
            app.next_tab();
            let field = match symbol {
                Some(symbol) => {
                    app.alert_form.symbol.set(&symbol);
                    AlertField::Target
                }
                None => AlertField::Symbol,
            };
            app.focus = Focus::AlertForm(field);
            app.mode = Mode::Insert;
            None
        }

        KeyCode::Char('c') => {
            if let Some(symbol) = app.selected_stock_symbol() {
                let message = format!("Chart for {symbol} would be displayed here");
                app.notify("Chart", message, Severity::Info);
            }
            None
        }

        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(symbol) = app.selected_stock_symbol() {
                app.pending_confirm = Some(PendingConfirm::RemoveStock(symbol.to_string()));
                app.mode = Mode::Confirm;
            }
            None
        }

        _ => None,
    }
}

/// Handles keys for the Alerts tab.
fn handle_alerts_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.selected_alert + 1 < app.alerts.len() {
                app.selected_alert += 1;
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.selected_alert = app.selected_alert.saturating_sub(1);
            None
        }

        KeyCode::Char('n') | KeyCode::Char('a') | KeyCode::Char('i') => {
            app.focus = Focus::AlertForm(AlertField::Symbol);
            app.mode = Mode::Insert;
            None
        }

        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.selected_alert_id() {
                app.pending_confirm = Some(PendingConfirm::RemoveAlert(id));
                app.mode = Mode::Confirm;
            }
            None
        }

        _ => None,
    }
}

/// Handles keys in insert mode (form input).
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => {
            leave_form(app);
            return None;
        }
        KeyCode::Up if !app.suggestions.is_empty() => {
            app.move_suggestion(-1);
            return None;
        }
        KeyCode::Down if !app.suggestions.is_empty() => {
            app.move_suggestion(1);
            return None;
        }
        KeyCode::Enter if app.accept_suggestion() => return None,
        _ => {}
    }

    match app.focus {
        Focus::StockForm => handle_stock_form_keys(app, key),
        Focus::AlertForm(field) => handle_alert_form_keys(app, key, field),
        Focus::Stocks | Focus::Alerts => {
            app.mode = Mode::Normal;
            None
        }
    }
}

fn handle_stock_form_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => submit_stock(app),
        _ => {
            if edit_text(&mut app.stock_form, key) {
                symbol_search(app)
            } else {
                None
            }
        }
    }
}

fn handle_alert_form_keys(app: &mut App, key: KeyEvent, field: AlertField) -> Option<Action> {
    match key.code {
        KeyCode::Enter => submit_alert(app),
        KeyCode::Tab => {
            app.clear_suggestions();
            app.focus = Focus::AlertForm(field.next());
            None
        }
        _ => match field {
            AlertField::Symbol => {
                if edit_text(&mut app.alert_form.symbol, key) {
                    symbol_search(app)
                } else {
                    None
                }
            }
            AlertField::Type => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                    app.alert_form.alert_type = app.alert_form.alert_type.next();
                }
                None
            }
            AlertField::Target => {
                edit_text(&mut app.alert_form.target, key);
                None
            }
        },
    }
}

/// Applies an editing key to `input`. Returns `true` if the text changed.
fn edit_text(input: &mut super::input::TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => {
            input.insert(c);
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.move_left();
            false
        }
        KeyCode::Right => {
            input.move_right();
            false
        }
        KeyCode::Home => {
            input.move_home();
            false
        }
        KeyCode::End => {
            input.move_end();
            false
        }
        _ => false,
    }
}

/// Requests suggestions for the symbol being typed, or clears them.
fn symbol_search(app: &mut App) -> Option<Action> {
    let query = app
        .active_symbol_input()
        .map(|input| input.as_str().trim().to_string())
        .unwrap_or_default();

    if query.chars().count() < MIN_SEARCH_LEN {
        app.clear_suggestions();
        return None;
    }
    Some(Action::SearchSymbols(query))
}

fn leave_form(app: &mut App) {
    app.mode = Mode::Normal;
    app.clear_suggestions();
    app.focus = match app.current_tab() {
        Tab::Watchlist => Focus::Stocks,
        Tab::Alerts => Focus::Alerts,
    };
}

fn submit_stock(app: &mut App) -> Option<Action> {
    let symbol = app.stock_form.as_str().trim().to_uppercase();
    if symbol.is_empty() {
        app.notify("Error", "Please enter a stock symbol", Severity::Error);
        return None;
    }
    leave_form(app);
    Some(Action::AddStock(symbol))
}

fn submit_alert(app: &mut App) -> Option<Action> {
    let symbol = app.alert_form.symbol.as_str().trim().to_uppercase();
    if symbol.is_empty() {
        app.notify("Error", "Please enter a stock symbol", Severity::Error);
        return None;
    }
    let Ok(target_value) = app.alert_form.target.as_str().trim().parse::<Decimal>() else {
        app.notify("Error", "Please enter a valid target value", Severity::Error);
        return None;
    };

    let alert = NewAlert {
        symbol,
        alert_type: app.alert_form.alert_type,
        target_value,
        sound_enabled: app.sound_enabled,
        browser_notifications: true,
    };
    leave_form(app);
    Some(Action::CreateAlert(alert))
}

/// Handles keys in confirm mode (dialogs).
fn handle_confirm_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.mode = Mode::Normal;
            match app.pending_confirm.take() {
                Some(PendingConfirm::RemoveStock(symbol)) => Some(Action::RemoveStock(symbol)),
                Some(PendingConfirm::RemoveAlert(id)) => Some(Action::RemoveAlert(id)),
                None => None,
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.pending_confirm = None;
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use std::time::Instant;

    use super::*;
    use crate::models::AlertType;
    use crate::tui::app::{NOTIFICATION_TTL, Notification};

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        update(app, Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))))
    }

    fn type_text(app: &mut App, text: &str) -> Option<Action> {
        text.chars().fold(None, |_, c| press(app, KeyCode::Char(c)))
    }

    fn app_with_stock(symbol: &str) -> App {
        let mut app = App::new(true);
        app.set_stocks(&[Stock {
            symbol: symbol.into(),
            ..Stock::default()
        }]);
        app
    }

    #[test]
    fn add_stock_submits_uppercased_symbol() {
        let mut app = App::new(true);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Insert);

        type_text(&mut app, " msft ");
        let action = press(&mut app, KeyCode::Enter);

        assert_eq!(action, Some(Action::AddStock("MSFT".into())));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn empty_symbol_is_rejected_without_request() {
        let mut app = App::new(true);
        press(&mut app, KeyCode::Char('a'));
        let action = press(&mut app, KeyCode::Enter);

        assert!(action.is_none());
        assert_eq!(
            app.notifications.back().unwrap().message,
            "Please enter a stock symbol"
        );
    }

    #[test]
    fn search_starts_at_two_characters() {
        let mut app = App::new(true);
        press(&mut app, KeyCode::Char('a'));
        assert!(press(&mut app, KeyCode::Char('A')).is_none());
        assert_eq!(
            press(&mut app, KeyCode::Char('P')),
            Some(Action::SearchSymbols("AP".into()))
        );
        assert!(press(&mut app, KeyCode::Backspace).is_none());
    }

    #[test]
    fn invalid_target_is_rejected() {
        let mut app = App::new(true);
        app.next_tab();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "aapl");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "abc");

        assert!(press(&mut app, KeyCode::Enter).is_none());
        assert_eq!(
            app.notifications.back().unwrap().message,
            "Please enter a valid target value"
        );
    }

    #[test]
    fn create_alert_builds_form_body() {
        let mut app = App::new(false);
        app.next_tab();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "aapl");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "150.5");

        let Some(Action::CreateAlert(alert)) = press(&mut app, KeyCode::Enter) else {
            panic!("expected create alert action");
        };
        assert_eq!(alert.symbol, "AAPL");
        assert_eq!(alert.alert_type, AlertType::PriceBelow);
        assert_eq!(alert.target_value, dec!(150.5));
        assert!(!alert.sound_enabled);
        assert!(alert.browser_notifications);
    }

    #[test]
    fn remove_requires_confirmation() {
        let mut app = app_with_stock("ACME");
        assert!(press(&mut app, KeyCode::Char('d')).is_none());
        assert_eq!(app.mode, Mode::Confirm);

        assert!(press(&mut app, KeyCode::Char('n')).is_none());
        assert_eq!(app.mode, Mode::Normal);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            press(&mut app, KeyCode::Char('y')),
            Some(Action::RemoveStock("ACME".into()))
        );
    }

    #[test]
    fn chart_shows_placeholder() {
        let mut app = app_with_stock("ACME");
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(
            app.notifications.back().unwrap().message,
            "Chart for ACME would be displayed here"
        );
    }

    #[test]
    fn action_outcomes_are_reported() {
        let mut app = App::new(true);
        app.stock_form.set("ACME");
        let next = update(
            &mut app,
            Message::ActionDone {
                kind: ActionKind::AddStock("ACME".into()),
                result: Ok(()),
            },
        );
        assert_eq!(next, Some(Action::RefreshStocks));
        assert_eq!(app.notifications.back().unwrap().message, "Added ACME to watchlist");
        assert!(app.stock_form.is_empty());

        update(
            &mut app,
            Message::ActionDone {
                kind: ActionKind::AddStock("NOPE".into()),
                result: Err(Some("Invalid stock symbol".into())),
            },
        );
        assert_eq!(app.notifications.back().unwrap().message, "Invalid stock symbol");

        update(
            &mut app,
            Message::ActionDone {
                kind: ActionKind::RemoveAlert,
                result: Err(None),
            },
        );
        assert_eq!(app.notifications.back().unwrap().message, "Failed to remove alert");
    }

    #[test]
    fn refresh_tasks_check_state_when_fired() {
        let mut app = App::new(true);
        assert_eq!(update(&mut app, Message::Refresh(RefreshTask::SummaryRefresh)), None);
        assert_eq!(
            update(&mut app, Message::Refresh(RefreshTask::Resync)),
            Some(Action::LoadAll)
        );

        update(&mut app, Message::Connected);
        assert_eq!(
            update(&mut app, Message::Refresh(RefreshTask::SummaryRefresh)),
            Some(Action::RefreshSummary)
        );
        assert_eq!(update(&mut app, Message::Refresh(RefreshTask::Resync)), None);
    }

    #[test]
    fn transport_error_notifies() {
        let mut app = App::new(true);
        update(&mut app, Message::TransportError("reset".into()));
        let shown = app.notifications.back().unwrap();
        assert_eq!(shown.title, "Connection Error");
        assert_eq!(shown.message, "Failed to connect to real-time updates");
    }

    #[test]
    fn focus_gained_reloads() {
        let mut app = App::new(true);
        assert_eq!(
            update(&mut app, Message::Input(Event::FocusGained)),
            Some(Action::LoadAll)
        );
    }

    #[test]
    fn q_quits_only_in_normal_mode() {
        let mut app = App::new(true);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.stock_form.as_str(), "q");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn tick_expires_old_notifications_only() {
        let mut app = App::new(true);
        app.notifications.push_back(Notification {
            title: "Old".into(),
            message: "stale".into(),
            severity: Severity::Info,
            shown_at: Instant::now()
                .checked_sub(NOTIFICATION_TTL + Duration::from_secs(1))
                .unwrap(),
        });
        app.notify("New", "fresh", Severity::Success);

        assert!(update(&mut app, Message::Input(Event::Tick)).is_none());

        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].title, "New");
    }

    #[test]
    fn sound_toggle_silences_alert_bell() {
        let mut app = App::new(true);

        press(&mut app, KeyCode::Char('s'));
        assert!(!app.sound_enabled);
        assert_eq!(app.notifications.back().unwrap().message, "Alert sound Disabled");
        app.notify("Alert Triggered!", "ACME", Severity::Alert);
        assert!(!app.take_bell());

        press(&mut app, KeyCode::Char('s'));
        assert!(app.sound_enabled);
        app.notify("Alert Triggered!", "ACME", Severity::Alert);
        assert!(app.take_bell());
    }
}

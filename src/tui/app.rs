//! Application state for the TUI.

use std::collections::{BTreeMap, VecDeque};
use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use super::format;
use super::input::TextInput;
use crate::models::{Alert, AlertType, MarketSummary, Severity, Stock, SymbolMatch};
use crate::websocket::ConnectionState;

/// Maximum number of notifications kept on screen.
const MAX_NOTIFICATIONS: usize = 6;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Minimum query length before symbol suggestions are requested.
pub const MIN_SEARCH_LEN: usize = 2;

/// Central application state container.
pub struct App {
    // -- Tab State --
    /// List of available tabs.
    pub tabs: Vec<Tab>,
    /// Index of the currently active tab.
    pub active_tab: usize,

    // -- Watchlist --
    /// Rendered stock rows, in server order.
    pub stocks: Vec<StockRow>,
    /// Selected row in the stocks table.
    pub selected_stock: usize,
    /// Formatted market summary cards, keyed by field name.
    pub summary: BTreeMap<String, String>,

    // -- Alerts --
    /// Configured alerts.
    pub alerts: Vec<Alert>,
    /// Selected row in the alerts table.
    pub selected_alert: usize,
    /// Alerts that have fired.
    pub triggered_alerts: Vec<Alert>,

    // -- Forms --
    /// Symbol field of the add-stock form.
    pub stock_form: TextInput,
    /// Create-alert form.
    pub alert_form: AlertForm,
    /// Suggestions for the symbol field being edited.
    pub suggestions: Vec<SymbolMatch>,
    /// Highlighted suggestion, if any.
    pub suggestion_index: Option<usize>,

    // -- Notifications --
    /// Visible notifications, oldest first.
    pub notifications: VecDeque<Notification>,
    /// Whether alert notifications ring the terminal bell.
    pub sound_enabled: bool,
    /// A bell is owed to the terminal.
    pub pending_bell: bool,

    // -- UI State --
    /// Current focus within the active tab.
    pub focus: Focus,
    /// Current input mode.
    pub mode: Mode,
    /// Removal waiting for confirmation.
    pub pending_confirm: Option<PendingConfirm>,

    // -- Connection State --
    /// Live channel status.
    pub connection_state: ConnectionState,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App instance with default state.
    pub fn new(sound_enabled: bool) -> Self {
        Self {
            tabs: vec![Tab::Watchlist, Tab::Alerts],
            active_tab: 0,

            stocks: Vec::new(),
            selected_stock: 0,
            summary: BTreeMap::new(),

            alerts: Vec::new(),
            selected_alert: 0,
            triggered_alerts: Vec::new(),

            stock_form: TextInput::new(),
            alert_form: AlertForm::default(),
            suggestions: Vec::new(),
            suggestion_index: None,

            notifications: VecDeque::with_capacity(MAX_NOTIFICATIONS),
            sound_enabled,
            pending_bell: false,

            focus: Focus::Stocks,
            mode: Mode::Normal,
            pending_confirm: None,

            connection_state: ConnectionState::Disconnected,

            should_quit: false,
        }
    }

    /// Returns the currently active tab.
    pub fn current_tab(&self) -> Tab {
        self.tabs[self.active_tab]
    }

    /// Switches to the next tab.
    pub fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % self.tabs.len();
        self.update_focus_for_tab();
    }

    /// Switches to the previous tab.
    pub fn previous_tab(&mut self) {
        self.active_tab = self
            .active_tab
            .checked_sub(1)
            .unwrap_or(self.tabs.len() - 1);
        self.update_focus_for_tab();
    }

    /// Updates focus when switching tabs.
    fn update_focus_for_tab(&mut self) {
        self.mode = Mode::Normal;
        self.clear_suggestions();
        self.focus = match self.current_tab() {
            Tab::Watchlist => Focus::Stocks,
            Tab::Alerts => Focus::Alerts,
        };
    }

    // -- Notifications --

    /// Shows a notification; alerts also ring the bell when sound is on.
    pub fn notify(&mut self, title: impl Into<String>, message: impl Into<String>, severity: Severity) {
        if self.notifications.len() >= MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(Notification {
            title: title.into(),
            message: message.into(),
            severity,
            shown_at: Instant::now(),
        });

        if self.sound_enabled && severity == Severity::Alert {
            self.pending_bell = true;
        }
    }

    /// Drops notifications older than [`NOTIFICATION_TTL`].
    pub fn clear_stale_notifications(&mut self) {
        self.notifications
            .retain(|n| n.shown_at.elapsed() <= NOTIFICATION_TTL);
    }

    /// Returns and resets the pending bell flag.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.pending_bell)
    }

    /// Flips the alert bell on or off.
    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
        let state = if self.sound_enabled { "Enabled" } else { "Disabled" };
        self.notify("Sound", format!("Alert sound {state}"), Severity::Info);
    }

    // -- Table data --

    /// Replaces the stocks table with a fresh server listing.
    pub fn set_stocks(&mut self, stocks: &[Stock]) {
        self.stocks = stocks.iter().map(StockRow::from_stock).collect();
        self.selected_stock = self.selected_stock.min(self.stocks.len().saturating_sub(1));
    }

    /// Replaces the alerts table.
    pub fn set_alerts(&mut self, alerts: Vec<Alert>) {
        self.alerts = alerts;
        self.selected_alert = self.selected_alert.min(self.alerts.len().saturating_sub(1));
    }

    /// Replaces the triggered alerts table.
    pub fn set_triggered_alerts(&mut self, alerts: Vec<Alert>) {
        self.triggered_alerts = alerts;
    }

    /// Overwrites each named summary field.
    pub fn update_summary(&mut self, summary: &MarketSummary) {
        for (key, value) in summary {
            self.summary
                .insert(key.clone(), format::summary_value(key, value));
        }
    }

    /// Finds the row for `symbol`.
    pub fn stock_row_mut(&mut self, symbol: &str) -> Option<&mut StockRow> {
        self.stocks.iter_mut().find(|row| row.symbol == symbol)
    }

    /// Marks the alert row with `id` as triggered. Returns `false` if absent.
    pub fn mark_alert_triggered(&mut self, id: u64) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                alert.triggered = true;
                true
            }
            None => false,
        }
    }

    pub fn selected_stock_symbol(&self) -> Option<&str> {
        self.stocks
            .get(self.selected_stock)
            .map(|row| row.symbol.as_str())
    }

    pub fn selected_alert_id(&self) -> Option<u64> {
        self.alerts.get(self.selected_alert).map(|a| a.id)
    }

    // -- Forms --

    /// The symbol field currently being edited, if any.
    pub fn active_symbol_input(&self) -> Option<&TextInput> {
        match self.focus {
            Focus::StockForm => Some(&self.stock_form),
            Focus::AlertForm(AlertField::Symbol) => Some(&self.alert_form.symbol),
            _ => None,
        }
    }

    fn active_symbol_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Focus::StockForm => Some(&mut self.stock_form),
            Focus::AlertForm(AlertField::Symbol) => Some(&mut self.alert_form.symbol),
            _ => None,
        }
    }

    /// Stores suggestions if they answer the query still in the field.
    pub fn set_suggestions(&mut self, query: &str, matches: Vec<SymbolMatch>) {
        let current = self.active_symbol_input().map(|i| i.as_str().trim());
        if current != Some(query) {
            return;
        }
        self.suggestions = matches;
        self.suggestion_index = None;
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestion_index = None;
    }

    /// Moves the suggestion highlight by `delta` (wrapping).
    pub fn move_suggestion(&mut self, delta: isize) {
        if self.suggestions.is_empty() {
            return;
        }
        let len = self.suggestions.len() as isize;
        let next = match self.suggestion_index {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.suggestion_index = Some(next as usize);
    }

    /// Copies the highlighted suggestion into the symbol field.
    ///
    /// Returns `false` when nothing is highlighted.
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(symbol) = self
            .suggestion_index
            .and_then(|i| self.suggestions.get(i))
            .map(|s| s.symbol.clone())
        else {
            return false;
        };
        if let Some(input) = self.active_symbol_input_mut() {
            input.set(&symbol);
        }
        self.clear_suggestions();
        true
    }
}

/// Tab types in the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    /// Stocks table, market summary and add-stock form.
    Watchlist,
    /// Alerts, triggered alerts and create-alert form.
    Alerts,
}

impl Tab {
    /// Returns the display title for the tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Watchlist => "Watchlist",
            Tab::Alerts => "Alerts",
        }
    }
}

/// UI focus targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    // Watchlist tab
    #[default]
    Stocks,
    StockForm,

    // Alerts tab
    Alerts,
    AlertForm(AlertField),
}

/// Fields of the create-alert form, in tab order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertField {
    #[default]
    Symbol,
    Type,
    Target,
}

impl AlertField {
    pub fn next(self) -> Self {
        match self {
            AlertField::Symbol => AlertField::Type,
            AlertField::Type => AlertField::Target,
            AlertField::Target => AlertField::Symbol,
        }
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Confirm,
}

/// A destructive action awaiting `y`/`n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingConfirm {
    RemoveStock(String),
    RemoveAlert(u64),
}

impl PendingConfirm {
    /// Question shown in the prompt line.
    pub fn prompt(&self) -> String {
        match self {
            PendingConfirm::RemoveStock(symbol) => {
                format!("Are you sure you want to remove {symbol} from your watchlist?")
            }
            PendingConfirm::RemoveAlert(_) => "Are you sure you want to remove this alert?".to_string(),
        }
    }
}

/// Create-alert form state.
#[derive(Clone, Debug, Default)]
pub struct AlertForm {
    pub symbol: TextInput,
    pub alert_type: AlertType,
    pub target: TextInput,
}

impl AlertForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Colour class of a change cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Tone {
    /// Positive for zero or gains, negative for losses.
    pub fn of(change: Option<Decimal>) -> Self {
        match change {
            Some(c) if c >= Decimal::ZERO => Tone::Positive,
            Some(_) => Tone::Negative,
            None => Tone::Neutral,
        }
    }
}

/// A rendered table cell with its colour class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToneCell {
    pub text: String,
    pub tone: Tone,
}

/// One row of the stocks table, holding display text per column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StockRow {
    pub symbol: String,
    pub exchange: String,
    pub name: String,
    pub price: String,
    pub change: ToneCell,
    pub change_percent: ToneCell,
    pub volume: String,
    pub market_cap: String,
    pub last_updated: String,
}

impl StockRow {
    /// Renders a row from a server listing entry.
    pub fn from_stock(stock: &Stock) -> Self {
        let tone = Tone::of(stock.price_change);
        Self {
            symbol: stock.symbol.clone(),
            exchange: stock
                .exchange
                .clone()
                .unwrap_or_else(|| format::NOT_AVAILABLE.to_string()),
            name: stock
                .name
                .clone()
                .unwrap_or_else(|| format::NOT_AVAILABLE.to_string()),
            price: format::money(stock.current_price),
            change: ToneCell {
                text: format::money(stock.price_change),
                tone,
            },
            change_percent: ToneCell {
                text: format::percent(stock.price_change_percent),
                tone,
            },
            volume: format::compact_or_na(stock.volume),
            market_cap: format::compact_or_na(stock.market_cap),
            last_updated: "-".to_string(),
        }
    }

    /// Applies a live update in place.
    ///
    /// Price and change cells always follow the update; volume and market
    /// cap keep their previous text when the update omits them.
    pub fn apply_update(&mut self, stock: &Stock, updated_at: &str) {
        let tone = Tone::of(stock.price_change);

        self.price = format::money(stock.current_price);
        self.change = ToneCell {
            text: format::money(stock.price_change),
            tone,
        };
        self.change_percent = ToneCell {
            text: format::percent(stock.price_change_percent),
            tone,
        };
        if let Some(volume) = stock.volume {
            self.volume = format::compact(volume);
        }
        if let Some(cap) = stock.market_cap {
            self.market_cap = format::compact(cap);
        }
        self.last_updated = updated_at.to_string();
    }
}

/// A toast in the notification panel.
#[derive(Clone, Debug)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

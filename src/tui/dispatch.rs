//! Routes decoded live-channel messages to their render effects.

use chrono::Local;
use tracing::debug;

use super::app::App;
use super::event::Action;
use super::format;
use crate::models::{AlertTrigger, InboundMessage, MarketSummary, Severity, Stock};

/// One handler per message discriminant.
///
/// Each handler may ask the runtime for follow-up work by returning an
/// [`Action`].
pub trait InboundHandler {
    fn on_stock_update(&mut self, stock: Stock) -> Option<Action>;
    fn on_alert_triggered(&mut self, trigger: AlertTrigger) -> Option<Action>;
    fn on_notification(&mut self, title: String, message: String, severity: Severity) -> Option<Action>;
    fn on_market_summary(&mut self, summary: MarketSummary) -> Option<Action>;
}

/// Invokes the handler registered for `message`'s discriminant exactly once.
pub fn dispatch<H: InboundHandler + ?Sized>(handler: &mut H, message: InboundMessage) -> Option<Action> {
    match message {
        InboundMessage::StockUpdate(stock) => handler.on_stock_update(stock),
        InboundMessage::AlertTriggered(trigger) => handler.on_alert_triggered(trigger),
        InboundMessage::Notification {
            title,
            message,
            severity,
        } => handler.on_notification(title, message, severity),
        InboundMessage::MarketSummary(summary) => handler.on_market_summary(summary),
    }
}

/// Message shown when an alert fires.
pub fn alert_trigger_text(trigger: &AlertTrigger) -> String {
    format!(
        "{}: {} triggered at {}",
        trigger.alert.symbol,
        trigger.alert.type_label(),
        format::money(trigger.stock_data.current_price)
    )
}

impl InboundHandler for App {
    fn on_stock_update(&mut self, stock: Stock) -> Option<Action> {
        let now = format::clock(Local::now());
        match self.stock_row_mut(&stock.symbol) {
            Some(row) => row.apply_update(&stock, &now),
            None => debug!(symbol = stock.symbol, "Update for symbol not in table"),
        }
        None
    }

    fn on_alert_triggered(&mut self, trigger: AlertTrigger) -> Option<Action> {
        self.notify("Alert Triggered!", alert_trigger_text(&trigger), Severity::Alert);
        if !self.mark_alert_triggered(trigger.alert.id) {
            debug!(alert_id = trigger.alert.id, "Triggered alert not in table");
        }
        Some(Action::RefreshTriggeredAlerts)
    }

    fn on_notification(&mut self, title: String, message: String, severity: Severity) -> Option<Action> {
        debug!(title, severity = severity.as_str(), "Server notification");
        self.notify(title, message, severity);
        None
    }

    fn on_market_summary(&mut self, summary: MarketSummary) -> Option<Action> {
        self.update_summary(&summary);
        None
    }
}

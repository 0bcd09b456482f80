//! Executes [`Action`]s against the REST API.
//!
//! Each action runs on its own task and reports back through the UI
//! channel; failures of read-only refreshes are logged, failures of
//! mutations are reported to the user.

use tokio::sync::mpsc;
use tracing::warn;

use super::event::{Action, ActionKind, Message};
use crate::WatchlistError;
use crate::api::ApiClient;

/// Spawns a task that carries out `action`.
pub fn spawn_action(api: &ApiClient, action: Action, tx: mpsc::UnboundedSender<Message>) {
    let api = api.clone();
    tokio::spawn(async move { run_action(&api, action, &tx).await });
}

/// Carries out `action`, sending its result messages to `tx`.
pub async fn run_action(api: &ApiClient, action: Action, tx: &mpsc::UnboundedSender<Message>) {
    match action {
        Action::LoadAll => {
            let (stocks, alerts, triggered, summary) = tokio::join!(
                api.stocks(),
                api.alerts(),
                api.triggered_alerts(),
                api.market_summary()
            );
            forward(tx, "stocks", stocks.map(Message::StocksLoaded));
            forward(tx, "alerts", alerts.map(Message::AlertsLoaded));
            forward(tx, "triggered alerts", triggered.map(Message::TriggeredAlertsLoaded));
            forward(tx, "market summary", summary.map(Message::SummaryLoaded));
        }
        Action::RefreshStocks => forward(tx, "stocks", api.stocks().await.map(Message::StocksLoaded)),
        Action::RefreshAlerts => forward(tx, "alerts", api.alerts().await.map(Message::AlertsLoaded)),
        Action::RefreshTriggeredAlerts => forward(
            tx,
            "triggered alerts",
            api.triggered_alerts().await.map(Message::TriggeredAlertsLoaded),
        ),
        Action::RefreshSummary => forward(
            tx,
            "market summary",
            api.market_summary().await.map(Message::SummaryLoaded),
        ),
        Action::SearchSymbols(query) => match api.search_symbols(&query).await {
            Ok(matches) => {
                let _ = tx.send(Message::Suggestions { query, matches });
            }
            Err(e) => warn!(query, "Symbol search failed: {e}"),
        },
        Action::AddStock(symbol) => {
            let result = api.add_stock(&symbol).await.map(drop);
            report(tx, ActionKind::AddStock(symbol), result);
        }
        Action::CreateAlert(alert) => {
            let result = api.create_alert(&alert).await.map(drop);
            report(tx, ActionKind::CreateAlert, result);
        }
        Action::RemoveStock(symbol) => {
            let result = api.remove_stock(&symbol).await.map(drop);
            report(tx, ActionKind::RemoveStock(symbol), result);
        }
        Action::RemoveAlert(id) => {
            let result = api.remove_alert(id).await.map(drop);
            report(tx, ActionKind::RemoveAlert, result);
        }
    }
}

/// Sends a successful load, or logs a failed one.
fn forward(tx: &mpsc::UnboundedSender<Message>, what: &str, result: crate::Result<Message>) {
    match result {
        Ok(message) => {
            let _ = tx.send(message);
        }
        Err(e) => warn!(what, "Refresh failed: {e}"),
    }
}

/// Reports a mutation outcome. Server rejections keep their message.
fn report(tx: &mpsc::UnboundedSender<Message>, kind: ActionKind, result: crate::Result<()>) {
    let result = result.map_err(|e| match e {
        WatchlistError::Api(message) => Some(message),
        other => {
            warn!(?kind, "Request failed: {other}");
            None
        }
    });
    let _ = tx.send(Message::ActionDone { kind, result });
}

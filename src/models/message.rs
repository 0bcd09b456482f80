//! Inbound envelopes pushed by the server over the live channel.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::alert::Alert;
use super::stock::Stock;
use crate::{Result, WatchlistError};

/// Market summary mapping, keyed by field name (`total_value`, ...).
pub type MarketSummary = BTreeMap<String, serde_json::Value>;

/// Discriminants understood by this client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    StockUpdate,
    AlertTriggered,
    Notification,
    MarketSummary,
}

impl MessageKind {
    /// Returns the wire-format value of the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::StockUpdate => "stock_update",
            MessageKind::AlertTriggered => "alert_triggered",
            MessageKind::Notification => "notification",
            MessageKind::MarketSummary => "market_summary",
        }
    }

    /// Looks up a discriminant by its wire name.
    pub fn from_wire(tag: &str) -> Option<Self> {
        match tag {
            "stock_update" => Some(MessageKind::StockUpdate),
            "alert_triggered" => Some(MessageKind::AlertTriggered),
            "notification" => Some(MessageKind::Notification),
            "market_summary" => Some(MessageKind::MarketSummary),
            _ => None,
        }
    }
}

/// Notification severity; unknown names fall back to [`Severity::Info`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    /// High priority: rings the bell when sound is enabled.
    Alert,
}

impl Severity {
    pub fn from_wire(name: &str) -> Self {
        match name {
            "success" => Severity::Success,
            "warning" => Severity::Warning,
            "error" => Severity::Error,
            "alert" => Severity::Alert,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Alert => "alert",
        }
    }
}

/// Payload of an `alert_triggered` envelope.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AlertTrigger {
    pub alert: Alert,
    pub stock_data: Stock,
}

/// A decoded inbound message.
#[derive(Clone, Debug, PartialEq)]
pub enum InboundMessage {
    StockUpdate(Stock),
    AlertTriggered(AlertTrigger),
    Notification {
        title: String,
        message: String,
        severity: Severity,
    },
    MarketSummary(MarketSummary),
}

impl InboundMessage {
    /// Returns the discriminant this message was decoded from.
    pub fn kind(&self) -> MessageKind {
        match self {
            InboundMessage::StockUpdate(_) => MessageKind::StockUpdate,
            InboundMessage::AlertTriggered(_) => MessageKind::AlertTriggered,
            InboundMessage::Notification { .. } => MessageKind::Notification,
            InboundMessage::MarketSummary(_) => MessageKind::MarketSummary,
        }
    }
}

/// Decodes one text frame from the live channel.
///
/// # Errors
///
/// Returns [`WatchlistError::MalformedMessage`] if the frame is not a JSON
/// object with a string `type`, [`WatchlistError::UnknownMessageType`] if the
/// discriminant is not recognized, and [`WatchlistError::Json`] if the
/// payload does not match the discriminant's shape.
pub fn parse_envelope(raw: &str) -> Result<InboundMessage> {
    let mut value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| WatchlistError::MalformedMessage(e.to_string()))?;

    let tag = value
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| WatchlistError::MalformedMessage("missing string `type` field".into()))?
        .to_string();

    let kind =
        MessageKind::from_wire(&tag).ok_or_else(|| WatchlistError::UnknownMessageType(tag))?;

    let message = match kind {
        MessageKind::StockUpdate => InboundMessage::StockUpdate(serde_json::from_value(take_data(&mut value)?)?),
        MessageKind::AlertTriggered => {
            InboundMessage::AlertTriggered(serde_json::from_value(take_data(&mut value)?)?)
        }
        MessageKind::MarketSummary => {
            InboundMessage::MarketSummary(serde_json::from_value(take_data(&mut value)?)?)
        }
        MessageKind::Notification => InboundMessage::Notification {
            title: string_field(&value, "title"),
            message: string_field(&value, "message"),
            severity: value
                .get("severity")
                .and_then(|s| s.as_str())
                .map(Severity::from_wire)
                .unwrap_or_default(),
        },
    };

    Ok(message)
}

/// Moves the `data` member out of an envelope.
fn take_data(value: &mut serde_json::Value) -> Result<serde_json::Value> {
    value
        .get_mut("data")
        .map(serde_json::Value::take)
        .filter(|data| !data.is_null())
        .ok_or_else(|| WatchlistError::MalformedMessage("missing `data` payload".into()))
}

fn string_field(value: &serde_json::Value, name: &str) -> String {
    value
        .get(name)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

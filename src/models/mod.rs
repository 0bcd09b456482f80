//! Wire models for the watchlist server.
//!
//! Contains the live-channel envelope, stock and alert resources, and the
//! reply shape shared by the REST mutation endpoints.

pub mod alert;
pub mod message;
pub mod stock;

use serde::Deserialize;

pub use alert::{Alert, AlertType, NewAlert};
pub use message::{AlertTrigger, InboundMessage, MarketSummary, MessageKind, Severity, parse_envelope};
pub use stock::{Stock, SymbolMatch};

/// Reply to `POST /add_stock`, `POST /create_alert` and the `DELETE`
/// endpoints.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

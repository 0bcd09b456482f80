use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price alert as reported by the server.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub symbol: String,
    /// Raw wire name, kept as a string so unknown kinds still render.
    pub alert_type: String,
    pub target_value: Decimal,
    #[serde(default)]
    pub triggered: bool,
    #[serde(default)]
    pub triggered_price: Option<Decimal>,
    #[serde(default)]
    pub triggered_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Alert {
    /// Human label for the alert kind: the first `_` becomes a space.
    pub fn type_label(&self) -> String {
        self.alert_type.replacen('_', " ", 1)
    }
}

/// Alert kinds offered by the creation form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    #[default]
    PriceAbove,
    PriceBelow,
    PercentageChange,
    VolumeSpike,
}

impl AlertType {
    /// Returns the wire-format name expected by `POST /create_alert`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::PriceAbove => "price_above",
            AlertType::PriceBelow => "price_below",
            AlertType::PercentageChange => "percentage_change",
            AlertType::VolumeSpike => "volume_spike",
        }
    }

    /// Cycles to the next kind (wraps around).
    pub fn next(self) -> Self {
        match self {
            AlertType::PriceAbove => AlertType::PriceBelow,
            AlertType::PriceBelow => AlertType::PercentageChange,
            AlertType::PercentageChange => AlertType::VolumeSpike,
            AlertType::VolumeSpike => AlertType::PriceAbove,
        }
    }
}

/// Form body for `POST /create_alert`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewAlert {
    pub symbol: String,
    pub alert_type: AlertType,
    pub target_value: Decimal,
    pub sound_enabled: bool,
    pub browser_notifications: bool,
}

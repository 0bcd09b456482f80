//! Wire model decoding tests.

use rust_decimal_macros::dec;
use watchlist::models::{Alert, ApiResponse, MarketSummary, SymbolMatch};

#[test]
fn alert_listing_deserializes() {
    let json = r#"[
        {"id":1,"symbol":"AAPL","alert_type":"price_above","target_value":200.0,"triggered":false,
         "triggered_price":null,"triggered_at":null,"created_at":"2024-05-01T09:30:00"},
        {"id":2,"symbol":"TSLA","alert_type":"volume_spike","target_value":3,"triggered":true,
         "triggered_price":181.2,"triggered_at":"2024-05-02T15:59:59","created_at":"2024-05-01T10:00:00"}
    ]"#;

    let alerts: Vec<Alert> = serde_json::from_str(json).expect("Failed to deserialize alerts");

    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].target_value, dec!(200));
    assert!(!alerts[0].triggered);
    assert_eq!(alerts[1].type_label(), "volume spike");
    assert_eq!(alerts[1].triggered_price, Some(dec!(181.2)));
}

#[test]
fn unknown_alert_type_still_labels() {
    let alert: Alert = serde_json::from_str(
        r#"{"id":5,"symbol":"X","alert_type":"moving_average_cross","target_value":1}"#,
    )
    .expect("Failed to deserialize alert");

    assert_eq!(alert.type_label(), "moving average_cross");
    assert_eq!(alert.created_at, None);
}

#[test]
fn api_response_message_is_optional() {
    let reply: ApiResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
    assert!(reply.success);
    assert_eq!(reply.message, None);
}

#[test]
fn symbol_match_tolerates_missing_fields() {
    let hit: SymbolMatch = serde_json::from_str(r#"{"symbol":"GOOGL"}"#).unwrap();
    assert_eq!(hit.symbol, "GOOGL");
    assert!(hit.name.is_empty());
}

#[test]
fn market_summary_keeps_arbitrary_fields() {
    let summary: MarketSummary =
        serde_json::from_str(r#"{"total_value":15234.5,"market_status":"open","gainers":3}"#).unwrap();

    assert_eq!(summary.len(), 3);
    assert_eq!(summary["market_status"], "open");
}

//! Live channel driver tests against a local WebSocket server.

mod common;

use std::time::Duration;

use tokio::sync::mpsc;
use url::Url;
use watchlist::models::{InboundMessage, Severity};
use watchlist::tui::Message;
use watchlist::websocket::ConnectionManager;

use common::{closed_port_origin, recv, spawn_ws_server, test_tls_config};

const SHORT_DELAY: Duration = Duration::from_millis(50);

fn start(origin: Url) -> mpsc::UnboundedReceiver<Message> {
    let (tx, rx) = mpsc::unbounded_channel();
    let manager = ConnectionManager::new(origin, test_tls_config(), SHORT_DELAY, tx);
    tokio::spawn(manager.run());
    rx
}

#[tokio::test]
async fn delivers_frames_in_order_and_reconnects_after_close() {
    let origin = spawn_ws_server(vec![vec![
        r#"{"type":"stock_update","data":{"symbol":"ACME","current_price":10.5,"price_change":-0.5,"price_change_percent":-4.55,"volume":12000}}"#.to_string(),
        r#"{"type":"bogus","data":{}}"#.to_string(),
        "not json".to_string(),
        r#"{"type":"notification","title":"Heads up","message":"Closing soon","severity":"warning"}"#.to_string(),
        r#"{"type":"market_summary","data":{"total_value":100}}"#.to_string(),
    ]])
    .await;
    let mut rx = start(origin);

    assert!(matches!(recv(&mut rx).await, Message::Connecting));
    assert!(matches!(recv(&mut rx).await, Message::Connected));

    match recv(&mut rx).await {
        Message::Inbound(InboundMessage::StockUpdate(stock)) => assert_eq!(stock.symbol, "ACME"),
        other => panic!("expected stock update, got {other:?}"),
    }
    match recv(&mut rx).await {
        Message::Inbound(InboundMessage::Notification { title, severity, .. }) => {
            assert_eq!(title, "Heads up");
            assert_eq!(severity, Severity::Warning);
        }
        other => panic!("expected notification, got {other:?}"),
    }
    assert!(matches!(
        recv(&mut rx).await,
        Message::Inbound(InboundMessage::MarketSummary(_))
    ));

    // Server closed the first connection: one reconnect after the delay.
    assert!(matches!(recv(&mut rx).await, Message::Disconnected));
    assert!(matches!(recv(&mut rx).await, Message::Connecting));
    assert!(matches!(recv(&mut rx).await, Message::Connected));
}

#[tokio::test]
async fn connect_failure_reports_error_then_retries() {
    let mut rx = start(closed_port_origin().await);

    assert!(matches!(recv(&mut rx).await, Message::Connecting));
    assert!(matches!(recv(&mut rx).await, Message::TransportError(_)));
    assert!(matches!(recv(&mut rx).await, Message::Disconnected));
    assert!(matches!(recv(&mut rx).await, Message::Connecting));
}

#[tokio::test]
async fn unsupported_origin_stays_disconnected() {
    let origin = Url::parse("ftp://example.com").unwrap();
    let mut rx = start(origin);

    assert!(matches!(recv(&mut rx).await, Message::Disconnected));
    // The driver gives up, dropping its sender.
    let closed = tokio::time::timeout(common::RECV_TIMEOUT, rx.recv()).await.unwrap();
    assert!(closed.is_none());
}

#[tokio::test]
async fn stops_when_ui_goes_away() {
    let origin = spawn_ws_server(Vec::new()).await;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(ConnectionManager::new(origin, test_tls_config(), SHORT_DELAY, tx).run());

    assert!(matches!(recv(&mut rx).await, Message::Connecting));
    assert!(matches!(recv(&mut rx).await, Message::Connected));
    drop(rx);

    tokio::time::timeout(common::RECV_TIMEOUT, handle)
        .await
        .expect("driver did not stop")
        .unwrap();
}

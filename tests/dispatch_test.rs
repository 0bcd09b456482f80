//! Dispatch from raw frames to render effects.

use rust_decimal_macros::dec;
use watchlist::models::{AlertTrigger, MarketSummary, Severity, Stock};
use watchlist::tui::app::{App, Tone};
use watchlist::tui::{Action, InboundHandler, Message, dispatch, update};
use watchlist::websocket::decode_frame;

/// Counts handler invocations per discriminant.
#[derive(Default)]
struct Recorder {
    stock_updates: Vec<Stock>,
    triggers: Vec<AlertTrigger>,
    notifications: Vec<(String, String, Severity)>,
    summaries: Vec<MarketSummary>,
}

impl InboundHandler for Recorder {
    fn on_stock_update(&mut self, stock: Stock) -> Option<Action> {
        self.stock_updates.push(stock);
        None
    }

    fn on_alert_triggered(&mut self, trigger: AlertTrigger) -> Option<Action> {
        self.triggers.push(trigger);
        None
    }

    fn on_notification(&mut self, title: String, message: String, severity: Severity) -> Option<Action> {
        self.notifications.push((title, message, severity));
        None
    }

    fn on_market_summary(&mut self, summary: MarketSummary) -> Option<Action> {
        self.summaries.push(summary);
        None
    }
}

impl Recorder {
    fn total(&self) -> usize {
        self.stock_updates.len() + self.triggers.len() + self.notifications.len() + self.summaries.len()
    }
}

fn feed(recorder: &mut Recorder, frame: &str) {
    if let Some(message) = decode_frame(frame) {
        dispatch(recorder, message);
    }
}

#[test]
fn each_recognized_envelope_fires_its_handler_once() {
    let mut recorder = Recorder::default();

    feed(&mut recorder, r#"{"type":"stock_update","data":{"symbol":"ACME","current_price":1}}"#);
    feed(
        &mut recorder,
        r#"{"type":"alert_triggered","data":{"alert":{"id":1,"symbol":"ACME","alert_type":"price_below","target_value":2},"stock_data":{"symbol":"ACME","current_price":1}}}"#,
    );
    feed(&mut recorder, r#"{"type":"notification","title":"T","message":"M","severity":"success"}"#);
    feed(&mut recorder, r#"{"type":"market_summary","data":{"total_stocks":4}}"#);

    assert_eq!(recorder.stock_updates.len(), 1);
    assert_eq!(recorder.stock_updates[0].current_price, Some(dec!(1)));
    assert_eq!(recorder.triggers.len(), 1);
    assert_eq!(recorder.triggers[0].alert.id, 1);
    assert_eq!(
        recorder.notifications,
        vec![("T".to_string(), "M".to_string(), Severity::Success)]
    );
    assert_eq!(recorder.summaries.len(), 1);
    assert_eq!(recorder.total(), 4);
}

#[test]
fn unrecognized_or_malformed_frames_fire_nothing() {
    let mut recorder = Recorder::default();

    feed(&mut recorder, r#"{"type":"bogus","data":{"symbol":"ACME"}}"#);
    feed(&mut recorder, "{{{");
    feed(&mut recorder, r#"["stock_update"]"#);
    feed(&mut recorder, r#"{"type":"stock_update","data":{"price":1}}"#);

    assert_eq!(recorder.total(), 0);
}

#[test]
fn stock_update_rewrites_existing_row() {
    let mut app = App::new(true);
    app.set_stocks(&[Stock {
        symbol: "ACME".into(),
        name: Some("Acme Corp".into()),
        current_price: Some(dec!(11)),
        price_change: Some(dec!(0.25)),
        price_change_percent: Some(dec!(2.3)),
        volume: Some(dec!(900)),
        market_cap: Some(dec!(1500000)),
        ..Stock::default()
    }]);

    let frame = r#"{"type":"stock_update","data":{"symbol":"ACME","current_price":10.5,"price_change":-0.5,"price_change_percent":-4.55,"volume":12000}}"#;
    let message = decode_frame(frame).unwrap();
    assert!(update(&mut app, Message::Inbound(message)).is_none());

    let row = &app.stocks[0];
    assert_eq!(row.price, "$10.50");
    assert_eq!(row.change.text, "$-0.50");
    assert_eq!(row.change.tone, Tone::Negative);
    assert_eq!(row.change_percent.text, "-4.55%");
    assert_eq!(row.change_percent.tone, Tone::Negative);
    assert_eq!(row.volume, "12.0K");
    assert_eq!(row.market_cap, "1.5M");
    assert_ne!(row.last_updated, "-");
}

#[test]
fn bogus_discriminant_leaves_state_unchanged() {
    let mut app = App::new(true);
    app.set_stocks(&[Stock {
        symbol: "ACME".into(),
        current_price: Some(dec!(11)),
        ..Stock::default()
    }]);
    let before = app.stocks.clone();

    assert!(decode_frame(r#"{"type":"bogus","data":{"symbol":"ACME","current_price":1}}"#).is_none());

    assert_eq!(app.stocks, before);
    assert!(app.notifications.is_empty());
}

#[test]
fn alert_trigger_notifies_and_requests_triggered_refresh() {
    let mut app = App::new(true);
    let frame = r#"{"type":"alert_triggered","data":{"alert":{"id":9,"symbol":"TSLA","alert_type":"price_below","target_value":200},"stock_data":{"symbol":"TSLA","current_price":199.5}}}"#;

    let action = update(&mut app, Message::Inbound(decode_frame(frame).unwrap()));

    assert_eq!(action, Some(Action::RefreshTriggeredAlerts));
    let shown = app.notifications.back().unwrap();
    assert_eq!(shown.title, "Alert Triggered!");
    assert_eq!(shown.message, "TSLA: price below triggered at $199.50");
}

#[test]
fn out_of_range_market_cap_still_updates_price() {
    let mut app = App::new(true);
    app.set_stocks(&[Stock {
        symbol: "ACME".into(),
        market_cap: Some(dec!(1500000)),
        ..Stock::default()
    }]);

    let frame = r#"{"type":"stock_update","data":{"symbol":"ACME","current_price":10.5,"market_cap":1e30}}"#;
    update(&mut app, Message::Inbound(decode_frame(frame).unwrap()));

    let row = &app.stocks[0];
    assert_eq!(row.price, "$10.50");
    assert_eq!(row.market_cap, "1.5M");
}

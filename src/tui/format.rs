//! Cell formatting shared by the tables and summary cards.

use chrono::{DateTime, Local, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder for values the server did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rounds half away from zero and pads to exactly `dp` decimals.
pub fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// `$` amount with two decimals (`-0.5` renders `$-0.50`).
pub fn money(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("${}", fixed(v, 2)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Percentage with two decimals.
pub fn percent(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{}%", fixed(v, 2)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Compact notation for volumes and market caps (`12.0K`, `2.5T`).
pub fn compact(value: Decimal) -> String {
    const UNITS: [(i64, &str); 4] = [
        (1_000_000_000_000, "T"),
        (1_000_000_000, "B"),
        (1_000_000, "M"),
        (1_000, "K"),
    ];

    for (scale, suffix) in UNITS {
        let scale = Decimal::from(scale);
        if value >= scale {
            return format!("{}{suffix}", fixed(value / scale, 1));
        }
    }
    value.normalize().to_string()
}

/// Compact notation, or `N/A` when absent.
pub fn compact_or_na(value: Option<Decimal>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), compact)
}

/// Formats one market summary field for its card.
pub fn summary_value(key: &str, value: &serde_json::Value) -> String {
    let number = || serde_json::from_value::<Decimal>(value.clone()).ok();

    match key {
        "total_value" | "daily_change" => match number() {
            Some(n) => money(Some(n)),
            None => plain(value),
        },
        "daily_change_percent" => match number() {
            Some(n) => percent(Some(n)),
            None => plain(value),
        },
        _ => plain(value),
    }
}

fn plain(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => NOT_AVAILABLE.to_string(),
        other => other.to_string(),
    }
}

/// Wall-clock time shown in the last-updated column.
pub fn clock(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Date part of a server timestamp (`2024-05-01T14:03:00` → `2024-05-01`).
pub fn date_label(timestamp: &str) -> String {
    parse_timestamp(timestamp)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Date and time of a server timestamp, or `N/A` when absent.
pub fn datetime_label(timestamp: Option<&str>) -> String {
    match timestamp {
        Some(ts) => parse_timestamp(ts)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| ts.to_string()),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Accepts RFC 3339 as well as the naive ISO form the server emits.
fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    if let Ok(t) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(t.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
}

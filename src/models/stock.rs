use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// A quote snapshot for one watched symbol.
///
/// Every numeric field is optional: the server sends `null` (or omits the
/// field) when market data is not available yet. A value that does not fit
/// a [`Decimal`] decodes as `None` instead of failing the whole quote.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Stock {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub current_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price_change: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price_change_percent: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub volume: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub market_cap: Option<Decimal>,
}

fn lenient_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value(value.clone()) {
        Ok(decimal) => Ok(Some(decimal)),
        Err(e) => {
            debug!(%value, error = %e, "Dropping out-of-range quote field");
            Ok(None)
        }
    }
}

/// A symbol search hit from `GET /search_symbols`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SymbolMatch {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub exchange: String,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn out_of_range_field_keeps_rest_of_quote() {
        let stock: Stock =
            serde_json::from_str(r#"{"symbol":"ACME","current_price":10.5,"market_cap":1e30}"#).unwrap();
        assert_eq!(stock.current_price, Some(dec!(10.5)));
        assert_eq!(stock.market_cap, None);
    }

    #[test]
    fn null_and_missing_fields_are_none() {
        let stock: Stock = serde_json::from_str(r#"{"symbol":"ACME","volume":null}"#).unwrap();
        assert_eq!(stock.volume, None);
        assert_eq!(stock.price_change, None);
    }
}

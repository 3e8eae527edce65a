use crate::enums::Side;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single executed position in the journal.
///
/// A trade is closed exactly when `exit_price` is present. `exit_time` is
/// expected to follow it but the pairing is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Empty until the store assigns one on first persist.
    #[serde(default)]
    pub id: String,
    pub symbol: String,
    pub side: Side,
    pub entry_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<DateTime<Utc>>,
    pub entry_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<f64>,
    pub quantity: f64,
    #[serde(default)]
    pub fees: f64,
    #[serde(default)]
    pub notes: String,
    // Both stamps are owned by the store; values supplied by a caller are ignored.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Trade {
    /// Creates an open trade with no id, fees or notes.
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        entry_time: DateTime<Utc>,
        entry_price: f64,
        quantity: f64,
    ) -> Self {
        Self {
            id: String::new(),
            symbol: symbol.into(),
            side,
            entry_time,
            exit_time: None,
            entry_price,
            exit_price: None,
            quantity,
            fees: 0.0,
            notes: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Marks the trade closed at the given time and price.
    pub fn closed_at(mut self, exit_time: DateTime<Utc>, exit_price: f64) -> Self {
        self.exit_time = Some(exit_time);
        self.exit_price = Some(exit_price);
        self
    }

    pub fn with_fees(mut self, fees: f64) -> Self {
        self.fees = fees;
        self
    }

    pub fn is_closed(&self) -> bool {
        self.exit_price.is_some()
    }
}

/// Read filter for the trade store.
///
/// All supplied filters apply conjunctively. The entry-time range is half-open
/// `[start_time, end_time)`. `limit` and `offset` only take effect when > 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeQuery {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

impl TradeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// The symbol filter, treating an empty string as "no filter".
    pub fn symbol_filter(&self) -> Option<&str> {
        self.symbol.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn closed_is_driven_by_exit_price() {
        let entry = Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap();
        let open = Trade::new("AAPL", Side::Long, entry, 100.0, 1.0);
        assert!(!open.is_closed());

        let mut only_time = open.clone();
        only_time.exit_time = Some(entry);
        assert!(!only_time.is_closed());

        let closed = open.closed_at(entry, 0.0);
        assert!(closed.is_closed());
        assert_eq!(closed.exit_price, Some(0.0));
    }

    #[test]
    fn empty_symbol_is_no_filter() {
        let mut query = TradeQuery::new();
        assert_eq!(query.symbol_filter(), None);
        query.symbol = Some(String::new());
        assert_eq!(query.symbol_filter(), None);
        query.symbol = Some("MSFT".to_string());
        assert_eq!(query.symbol_filter(), Some("MSFT"));
    }

    #[test]
    fn query_deserializes_from_ui_shape() {
        let query: TradeQuery = serde_json::from_str(
            r#"{"symbol":"TSLA","side":"short","startTime":"2024-01-01T00:00:00Z","limit":1000,"offset":0}"#,
        )
        .unwrap();
        assert_eq!(query.symbol_filter(), Some("TSLA"));
        assert_eq!(query.side, Some(Side::Short));
        assert!(query.start_time.is_some());
        assert!(query.end_time.is_none());
        assert_eq!(query.limit, 1000);
    }
}

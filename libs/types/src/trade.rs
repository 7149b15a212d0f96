//! Trade tape types

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::Symbol;
use crate::quote::TradeSession;

/// Aggressor direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TradeDirection {
    #[default]
    Neutral,
    Down,
    Up,
    Unknown(i32),
}

impl From<i32> for TradeDirection {
    fn from(code: i32) -> Self {
        match code {
            0 => TradeDirection::Neutral,
            1 => TradeDirection::Down,
            2 => TradeDirection::Up,
            other => TradeDirection::Unknown(other),
        }
    }
}

/// A single print on the tape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub price: Option<Decimal>,
    pub volume: i64,
    /// Unix seconds.
    pub timestamp: i64,
    /// Exchange trade-type flag; empty for a regular automatch trade.
    pub trade_type: String,
    pub direction: TradeDirection,
    pub trade_session: TradeSession,
}

impl Trade {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.timestamp, 0).single()
    }
}

/// Batch of trades pushed by the server. Gated as a whole by `sequence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushTrade {
    pub symbol: Symbol,
    pub sequence: i64,
    pub trades: Vec<Trade>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_direction_from_code() {
        assert_eq!(TradeDirection::from(0), TradeDirection::Neutral);
        assert_eq!(TradeDirection::from(1), TradeDirection::Down);
        assert_eq!(TradeDirection::from(2), TradeDirection::Up);
        assert_eq!(TradeDirection::from(7), TradeDirection::Unknown(7));
    }

    #[test]
    fn test_trade_datetime() {
        let trade = Trade {
            price: Some(Decimal::new(3805, 1)),
            volume: 100,
            timestamp: 1_651_103_979,
            trade_type: String::new(),
            direction: TradeDirection::Up,
            trade_session: TradeSession::Intraday,
        };
        assert_eq!(trade.datetime().unwrap().timestamp(), 1_651_103_979);
    }
}

//! Markets, trading sessions and trading days

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::quote::TradeSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    US,
    HK,
    CN,
    SG,
    Unknown,
}

impl Market {
    pub fn as_str(self) -> &'static str {
        match self {
            Market::US => "US",
            Market::HK => "HK",
            Market::CN => "CN",
            Market::SG => "SG",
            Market::Unknown => "",
        }
    }
}

impl From<&str> for Market {
    fn from(code: &str) -> Self {
        match code {
            "US" => Market::US,
            "HK" => Market::HK,
            "CN" => Market::CN,
            "SG" => Market::SG,
            _ => Market::Unknown,
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trading window of a market day. Times are `hhmm` in market-local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePeriod {
    pub beg_time: i32,
    pub end_time: i32,
    pub trade_session: TradeSession,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketTradingSession {
    pub market: Market,
    pub trade_sessions: Vec<TradePeriod>,
}

/// Full and half trading days of a market within a date range.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketTradingDay {
    pub trade_days: Vec<NaiveDate>,
    pub half_trade_days: Vec<NaiveDate>,
}

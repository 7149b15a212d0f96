//! Reference data returned by pull queries
//!
//! Static security info, broker participants, intraday lines and
//! candlesticks. None of these are pushed or cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::Symbol;

/// Static description of a security.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticInfo {
    pub symbol: Symbol,
    pub name_cn: String,
    pub name_en: String,
    pub name_hk: String,
    pub exchange: String,
    pub currency: String,
    pub lot_size: i32,
    pub total_shares: i64,
    pub circulating_shares: i64,
    pub hk_shares: i64,
    pub eps: Option<Decimal>,
    pub eps_ttm: Option<Decimal>,
    pub bps: Option<Decimal>,
    pub dividend_yield: Option<Decimal>,
    pub stock_derivatives: Vec<i32>,
}

/// A broker participant and the broker ids it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub broker_ids: Vec<i32>,
    pub name_cn: String,
    pub name_en: String,
    pub name_hk: String,
}

/// One point of the intraday line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntradayLine {
    pub price: Option<Decimal>,
    pub timestamp: i64,
    pub volume: i64,
    pub turnover: Option<Decimal>,
    pub avg_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candlestick {
    pub close: Option<Decimal>,
    pub open: Option<Decimal>,
    pub low: Option<Decimal>,
    pub high: Option<Decimal>,
    pub volume: i64,
    pub turnover: Option<Decimal>,
    pub timestamp: i64,
}

/// Candlestick period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    OneMinute,
    FiveMinute,
    FifteenMinute,
    ThirtyMinute,
    SixtyMinute,
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub fn code(self) -> i32 {
        match self {
            Period::OneMinute => 1,
            Period::FiveMinute => 5,
            Period::FifteenMinute => 15,
            Period::ThirtyMinute => 30,
            Period::SixtyMinute => 60,
            Period::Day => 1000,
            Period::Week => 2000,
            Period::Month => 3000,
            Period::Year => 4000,
        }
    }
}

/// Price adjustment applied to candlesticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AdjustType {
    #[default]
    NoAdjust,
    Forward,
}

impl AdjustType {
    pub fn code(self) -> i32 {
        match self {
            AdjustType::NoAdjust => 0,
            AdjustType::Forward => 1,
        }
    }
}

//! Quote types
//!
//! `PushQuote` is what the server sends; `Quote` is the merged snapshot the
//! client keeps per symbol. Prices are `Decimal`; `None` means the server
//! left the field unset.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::Symbol;

/// Trading status of a security.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TradeStatus {
    #[default]
    Normal,
    Halted,
    Delisted,
    Fuse,
    PrepareList,
    CodeMoved,
    ToBeOpened,
    SplitStockHalts,
    Expired,
    WarrantPrepareList,
    SuspendTrade,
    Unknown(i32),
}

impl From<i32> for TradeStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => TradeStatus::Normal,
            1 => TradeStatus::Halted,
            2 => TradeStatus::Delisted,
            3 => TradeStatus::Fuse,
            4 => TradeStatus::PrepareList,
            5 => TradeStatus::CodeMoved,
            6 => TradeStatus::ToBeOpened,
            7 => TradeStatus::SplitStockHalts,
            8 => TradeStatus::Expired,
            9 => TradeStatus::WarrantPrepareList,
            10 => TradeStatus::SuspendTrade,
            other => TradeStatus::Unknown(other),
        }
    }
}

/// Trading session a quote or trade belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TradeSession {
    #[default]
    Intraday,
    PreMarket,
    PostMarket,
    Overnight,
    Unknown(i32),
}

impl From<i32> for TradeSession {
    fn from(code: i32) -> Self {
        match code {
            0 => TradeSession::Intraday,
            1 => TradeSession::PreMarket,
            2 => TradeSession::PostMarket,
            3 => TradeSession::Overnight,
            other => TradeSession::Unknown(other),
        }
    }
}

/// Quote update pushed by the server. May be a partial delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushQuote {
    pub symbol: Symbol,
    /// Server sequence for (symbol, quote).
    pub sequence: i64,
    pub last_done: Option<Decimal>,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    /// Unix seconds.
    pub timestamp: i64,
    /// Cumulative volume; 0 means unchanged.
    pub volume: i64,
    pub turnover: Option<Decimal>,
    pub trade_status: TradeStatus,
    pub trade_session: TradeSession,
}

/// Merged quote snapshot for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    /// Sequence of the last push merged into this snapshot.
    pub sequence: i64,
    pub last_done: Option<Decimal>,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub timestamp: i64,
    pub volume: i64,
    pub turnover: Option<Decimal>,
    pub trade_status: TradeStatus,
    pub trade_session: TradeSession,
}

impl Quote {
    /// An empty snapshot, before any push has been merged.
    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            sequence: -1,
            last_done: None,
            open: None,
            high: None,
            low: None,
            timestamp: 0,
            volume: 0,
            turnover: None,
            trade_status: TradeStatus::default(),
            trade_session: TradeSession::default(),
        }
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.timestamp, 0).single()
    }
}

/// Pre-market or post-market quote details returned by a pull query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrePostQuote {
    pub last_done: Option<Decimal>,
    pub timestamp: i64,
    pub volume: i64,
    pub turnover: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub prev_close: Option<Decimal>,
}

/// Full quote returned by a pull query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityQuote {
    pub symbol: Symbol,
    pub last_done: Option<Decimal>,
    pub prev_close: Option<Decimal>,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub timestamp: i64,
    pub volume: i64,
    pub turnover: Option<Decimal>,
    pub trade_status: TradeStatus,
    pub pre_market_quote: Option<PrePostQuote>,
    pub post_market_quote: Option<PrePostQuote>,
}

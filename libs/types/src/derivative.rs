//! Option and warrant quotes
//!
//! Pull-only. An option or warrant quote is the plain quote fields plus an
//! extension block describing the contract.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::Symbol;
use crate::quote::TradeStatus;

/// Contract details of an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionExtend {
    pub implied_volatility: Option<Decimal>,
    pub open_interest: i64,
    pub expiry_date: Option<NaiveDate>,
    pub strike_price: Option<Decimal>,
    pub contract_multiplier: Option<Decimal>,
    /// `A` (American) or `U` (European)
    pub contract_type: String,
    pub contract_size: Option<Decimal>,
    /// `P` (put) or `C` (call)
    pub direction: String,
    pub historical_volatility: Option<Decimal>,
    pub underlying_symbol: Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionQuote {
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
    pub option_extend: Option<OptionExtend>,
}

/// Contract details of a HK warrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantExtend {
    pub implied_volatility: Option<Decimal>,
    pub expiry_date: Option<NaiveDate>,
    pub last_trade_date: Option<NaiveDate>,
    pub outstanding_ratio: Option<Decimal>,
    pub outstanding_qty: i64,
    pub conversion_ratio: Option<Decimal>,
    pub category: String,
    pub strike_price: Option<Decimal>,
    pub upper_strike_price: Option<Decimal>,
    pub lower_strike_price: Option<Decimal>,
    pub call_price: Option<Decimal>,
    pub underlying_symbol: Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantQuote {
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
    pub warrant_extend: Option<WarrantExtend>,
}

/// One strike of an option chain: the call and put listed at `price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikePriceInfo {
    pub price: Option<Decimal>,
    pub call_symbol: Symbol,
    pub put_symbol: Symbol,
    pub standard: bool,
}

/// A warrant issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerInfo {
    pub id: i32,
    pub name_cn: String,
    pub name_en: String,
    pub name_hk: String,
}

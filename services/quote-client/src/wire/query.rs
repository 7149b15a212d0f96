//! Pull-query request and reply DTOs

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use types::calendar::{Market, MarketTradingDay, MarketTradingSession, TradePeriod};
use types::depth::{Brokers, SecurityBrokers, SecurityDepth};
use types::derivative::{
    IssuerInfo, OptionExtend, OptionQuote, StrikePriceInfo, WarrantExtend, WarrantQuote,
};
use types::errors::DecodeError;
use types::ids::Symbol;
use types::numeric::{format_date, parse_date, parse_dates, parse_decimal};
use types::quote::{PrePostQuote, SecurityQuote};
use types::reference::{AdjustType, Candlestick, IntradayLine, ParticipantInfo, Period, StaticInfo};
use types::trade::Trade;

use super::push::{depth_rows, trade_rows, BrokersRow, DepthRow, TradeRow};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSecurityRequest {
    pub symbols: Vec<String>,
}

impl MultiSecurityRequest {
    pub fn new(symbols: &[Symbol]) -> Self {
        Self {
            symbols: symbols.iter().map(|s| s.as_str().to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRequest {
    pub symbol: String,
}

impl SecurityRequest {
    pub fn new(symbol: &Symbol) -> Self {
        Self {
            symbol: symbol.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityTradeRequest {
    pub symbol: String,
    pub count: u32,
}

impl SecurityTradeRequest {
    pub fn new(symbol: &Symbol, count: u32) -> Self {
        Self {
            symbol: symbol.as_str().to_string(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityCandlestickRequest {
    pub symbol: String,
    pub period: i32,
    pub count: u32,
    pub adjust_type: i32,
}

impl SecurityCandlestickRequest {
    pub fn new(symbol: &Symbol, period: Period, count: u32, adjust: AdjustType) -> Self {
        Self {
            symbol: symbol.as_str().to_string(),
            period: period.code(),
            count,
            adjust_type: adjust.code(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChainDateStrikeInfoRequest {
    pub symbol: String,
    pub expiry_date: String,
}

impl OptionChainDateStrikeInfoRequest {
    pub fn new(symbol: &Symbol, expiry_date: NaiveDate) -> Self {
        Self {
            symbol: symbol.as_str().to_string(),
            expiry_date: format_date(expiry_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTradeDayRequest {
    pub market: String,
    pub beg_day: String,
    pub end_day: String,
}

impl MarketTradeDayRequest {
    pub fn new(market: Market, begin: NaiveDate, end: NaiveDate) -> Self {
        Self {
            market: market.as_str().to_string(),
            beg_day: format_date(begin),
            end_day: format_date(end),
        }
    }
}

/// Selects which half of a history candlestick request the server reads.
pub const HISTORY_QUERY_BY_OFFSET: i32 = 1;
pub const HISTORY_QUERY_BY_DATE: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryOffsetRequest {
    /// 0 = backward from `date`/`minute`, 1 = forward
    pub direction: i32,
    /// `YYYYMMDD`; empty means the latest trading day
    pub date: String,
    /// `HHMM`; empty means the end of `date`
    pub minute: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDateRequest {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryCandlestickRequest {
    pub symbol: String,
    pub period: i32,
    pub adjust_type: i32,
    pub query_type: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_request: Option<HistoryOffsetRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_request: Option<HistoryDateRequest>,
}

impl HistoryCandlestickRequest {
    pub fn by_offset(
        symbol: &Symbol,
        period: Period,
        adjust: AdjustType,
        forward: bool,
        at: Option<NaiveDateTime>,
        count: u32,
    ) -> Self {
        let (date, minute) = match at {
            Some(at) => (format_date(at.date()), at.format("%H%M").to_string()),
            None => (String::new(), String::new()),
        };
        Self {
            symbol: symbol.as_str().to_string(),
            period: period.code(),
            adjust_type: adjust.code(),
            query_type: HISTORY_QUERY_BY_OFFSET,
            offset_request: Some(HistoryOffsetRequest {
                direction: i32::from(forward),
                date,
                minute,
                count,
            }),
            date_request: None,
        }
    }

    pub fn by_date(
        symbol: &Symbol,
        period: Period,
        adjust: AdjustType,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        Self {
            symbol: symbol.as_str().to_string(),
            period: period.code(),
            adjust_type: adjust.code(),
            query_type: HISTORY_QUERY_BY_DATE,
            offset_request: None,
            date_request: Some(HistoryDateRequest {
                start_date: start.map(format_date).unwrap_or_default(),
                end_date: end.map(format_date).unwrap_or_default(),
            }),
        }
    }
}

/// Body for commands that take no arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmptyRequest {}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaticInfoRow {
    pub symbol: String,
    pub name_cn: String,
    pub name_en: String,
    pub name_hk: String,
    pub exchange: String,
    pub currency: String,
    pub lot_size: i32,
    pub total_shares: i64,
    pub circulating_shares: i64,
    pub hk_shares: i64,
    pub eps: String,
    pub eps_ttm: String,
    pub bps: String,
    pub dividend_yield: String,
    pub stock_derivatives: Vec<i32>,
}

impl StaticInfoRow {
    pub fn into_domain(self) -> Result<StaticInfo, DecodeError> {
        Ok(StaticInfo {
            symbol: Symbol::new(self.symbol),
            name_cn: self.name_cn,
            name_en: self.name_en,
            name_hk: self.name_hk,
            exchange: self.exchange,
            currency: self.currency,
            lot_size: self.lot_size,
            total_shares: self.total_shares,
            circulating_shares: self.circulating_shares,
            hk_shares: self.hk_shares,
            eps: parse_decimal("eps", &self.eps)?,
            eps_ttm: parse_decimal("epsTtm", &self.eps_ttm)?,
            bps: parse_decimal("bps", &self.bps)?,
            dividend_yield: parse_decimal("dividendYield", &self.dividend_yield)?,
            stock_derivatives: self.stock_derivatives,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaticInfoResponse {
    pub secu_static_info: Vec<StaticInfoRow>,
}

impl StaticInfoResponse {
    pub fn into_domain(self) -> Result<Vec<StaticInfo>, DecodeError> {
        self.secu_static_info
            .into_iter()
            .map(StaticInfoRow::into_domain)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrePostQuoteRow {
    pub last_done: String,
    pub timestamp: i64,
    pub volume: i64,
    pub turnover: String,
    pub high: String,
    pub low: String,
    pub prev_close: String,
}

impl PrePostQuoteRow {
    pub fn into_domain(self) -> Result<PrePostQuote, DecodeError> {
        Ok(PrePostQuote {
            last_done: parse_decimal("lastDone", &self.last_done)?,
            timestamp: self.timestamp,
            volume: self.volume,
            turnover: parse_decimal("turnover", &self.turnover)?,
            high: parse_decimal("high", &self.high)?,
            low: parse_decimal("low", &self.low)?,
            prev_close: parse_decimal("prevClose", &self.prev_close)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityQuoteRow {
    pub symbol: String,
    pub last_done: String,
    pub prev_close: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub timestamp: i64,
    pub volume: i64,
    pub turnover: String,
    pub trade_status: i32,
    pub pre_market_quote: Option<PrePostQuoteRow>,
    pub post_market_quote: Option<PrePostQuoteRow>,
}

impl SecurityQuoteRow {
    pub fn into_domain(self) -> Result<SecurityQuote, DecodeError> {
        Ok(SecurityQuote {
            symbol: Symbol::new(self.symbol),
            last_done: parse_decimal("lastDone", &self.last_done)?,
            prev_close: parse_decimal("prevClose", &self.prev_close)?,
            open: parse_decimal("open", &self.open)?,
            high: parse_decimal("high", &self.high)?,
            low: parse_decimal("low", &self.low)?,
            timestamp: self.timestamp,
            volume: self.volume,
            turnover: parse_decimal("turnover", &self.turnover)?,
            trade_status: self.trade_status.into(),
            pre_market_quote: self.pre_market_quote.map(PrePostQuoteRow::into_domain).transpose()?,
            post_market_quote: self.post_market_quote.map(PrePostQuoteRow::into_domain).transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityQuoteResponse {
    pub secu_quote: Vec<SecurityQuoteRow>,
}

impl SecurityQuoteResponse {
    pub fn into_domain(self) -> Result<Vec<SecurityQuote>, DecodeError> {
        self.secu_quote
            .into_iter()
            .map(SecurityQuoteRow::into_domain)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityDepthResponse {
    pub symbol: String,
    pub ask: Vec<DepthRow>,
    pub bid: Vec<DepthRow>,
}

impl SecurityDepthResponse {
    pub fn into_domain(self) -> Result<SecurityDepth, DecodeError> {
        Ok(SecurityDepth {
            symbol: Symbol::new(self.symbol),
            ask: depth_rows(self.ask)?,
            bid: depth_rows(self.bid)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityBrokersResponse {
    pub symbol: String,
    pub ask_brokers: Vec<BrokersRow>,
    pub bid_brokers: Vec<BrokersRow>,
}

impl From<SecurityBrokersResponse> for SecurityBrokers {
    fn from(resp: SecurityBrokersResponse) -> Self {
        SecurityBrokers {
            symbol: Symbol::new(resp.symbol),
            ask_brokers: resp.ask_brokers.into_iter().map(Brokers::from).collect(),
            bid_brokers: resp.bid_brokers.into_iter().map(Brokers::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantRow {
    pub broker_ids: Vec<i32>,
    pub participant_name_cn: String,
    pub participant_name_en: String,
    pub participant_name_hk: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantsResponse {
    pub participant_broker_numbers: Vec<ParticipantRow>,
}

impl From<ParticipantsResponse> for Vec<ParticipantInfo> {
    fn from(resp: ParticipantsResponse) -> Self {
        resp.participant_broker_numbers
            .into_iter()
            .map(|row| ParticipantInfo {
                broker_ids: row.broker_ids,
                name_cn: row.participant_name_cn,
                name_en: row.participant_name_en,
                name_hk: row.participant_name_hk,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityTradeResponse {
    pub symbol: String,
    pub trades: Vec<TradeRow>,
}

impl SecurityTradeResponse {
    pub fn into_domain(self) -> Result<Vec<Trade>, DecodeError> {
        trade_rows(self.trades)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntradayRow {
    pub price: String,
    pub timestamp: i64,
    pub volume: i64,
    pub turnover: String,
    pub avg_price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityIntradayResponse {
    pub symbol: String,
    pub lines: Vec<IntradayRow>,
}

impl SecurityIntradayResponse {
    pub fn into_domain(self) -> Result<Vec<IntradayLine>, DecodeError> {
        self.lines
            .into_iter()
            .map(|row| {
                Ok(IntradayLine {
                    price: parse_decimal("price", &row.price)?,
                    timestamp: row.timestamp,
                    volume: row.volume,
                    turnover: parse_decimal("turnover", &row.turnover)?,
                    avg_price: parse_decimal("avgPrice", &row.avg_price)?,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandlestickRow {
    pub close: String,
    pub open: String,
    pub low: String,
    pub high: String,
    pub volume: i64,
    pub turnover: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityCandlestickResponse {
    pub symbol: String,
    pub candlesticks: Vec<CandlestickRow>,
}

impl SecurityCandlestickResponse {
    pub fn into_domain(self) -> Result<Vec<Candlestick>, DecodeError> {
        self.candlesticks
            .into_iter()
            .map(|row| {
                Ok(Candlestick {
                    close: parse_decimal("close", &row.close)?,
                    open: parse_decimal("open", &row.open)?,
                    low: parse_decimal("low", &row.low)?,
                    high: parse_decimal("high", &row.high)?,
                    volume: row.volume,
                    turnover: parse_decimal("turnover", &row.turnover)?,
                    timestamp: row.timestamp,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionExtendRow {
    pub implied_volatility: String,
    pub open_interest: i64,
    pub expiry_date: String,
    pub strike_price: String,
    pub contract_multiplier: String,
    pub contract_type: String,
    pub contract_size: String,
    pub direction: String,
    pub historical_volatility: String,
    pub underlying_symbol: String,
}

impl OptionExtendRow {
    pub fn into_domain(self) -> Result<OptionExtend, DecodeError> {
        Ok(OptionExtend {
            implied_volatility: parse_decimal("impliedVolatility", &self.implied_volatility)?,
            open_interest: self.open_interest,
            expiry_date: parse_date("expiryDate", &self.expiry_date)?,
            strike_price: parse_decimal("strikePrice", &self.strike_price)?,
            contract_multiplier: parse_decimal("contractMultiplier", &self.contract_multiplier)?,
            contract_type: self.contract_type,
            contract_size: parse_decimal("contractSize", &self.contract_size)?,
            direction: self.direction,
            historical_volatility: parse_decimal("historicalVolatility", &self.historical_volatility)?,
            underlying_symbol: Symbol::new(self.underlying_symbol),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionQuoteRow {
    pub symbol: String,
    pub last_done: String,
    pub prev_close: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub timestamp: i64,
    pub volume: i64,
    pub turnover: String,
    pub trade_status: i32,
    pub option_extend: Option<OptionExtendRow>,
}

impl OptionQuoteRow {
    pub fn into_domain(self) -> Result<OptionQuote, DecodeError> {
        Ok(OptionQuote {
            symbol: Symbol::new(self.symbol),
            last_done: parse_decimal("lastDone", &self.last_done)?,
            prev_close: parse_decimal("prevClose", &self.prev_close)?,
            open: parse_decimal("open", &self.open)?,
            high: parse_decimal("high", &self.high)?,
            low: parse_decimal("low", &self.low)?,
            timestamp: self.timestamp,
            volume: self.volume,
            turnover: parse_decimal("turnover", &self.turnover)?,
            trade_status: self.trade_status.into(),
            option_extend: self.option_extend.map(OptionExtendRow::into_domain).transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionQuoteResponse {
    pub secu_quote: Vec<OptionQuoteRow>,
}

impl OptionQuoteResponse {
    pub fn into_domain(self) -> Result<Vec<OptionQuote>, DecodeError> {
        self.secu_quote
            .into_iter()
            .map(OptionQuoteRow::into_domain)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WarrantExtendRow {
    pub implied_volatility: String,
    pub expiry_date: String,
    pub last_trade_date: String,
    pub outstanding_ratio: String,
    pub outstanding_qty: i64,
    pub conversion_ratio: String,
    pub category: String,
    pub strike_price: String,
    pub upper_strike_price: String,
    pub lower_strike_price: String,
    pub call_price: String,
    pub underlying_symbol: String,
}

impl WarrantExtendRow {
    pub fn into_domain(self) -> Result<WarrantExtend, DecodeError> {
        Ok(WarrantExtend {
            implied_volatility: parse_decimal("impliedVolatility", &self.implied_volatility)?,
            expiry_date: parse_date("expiryDate", &self.expiry_date)?,
            last_trade_date: parse_date("lastTradeDate", &self.last_trade_date)?,
            outstanding_ratio: parse_decimal("outstandingRatio", &self.outstanding_ratio)?,
            outstanding_qty: self.outstanding_qty,
            conversion_ratio: parse_decimal("conversionRatio", &self.conversion_ratio)?,
            category: self.category,
            strike_price: parse_decimal("strikePrice", &self.strike_price)?,
            upper_strike_price: parse_decimal("upperStrikePrice", &self.upper_strike_price)?,
            lower_strike_price: parse_decimal("lowerStrikePrice", &self.lower_strike_price)?,
            call_price: parse_decimal("callPrice", &self.call_price)?,
            underlying_symbol: Symbol::new(self.underlying_symbol),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WarrantQuoteRow {
    pub symbol: String,
    pub last_done: String,
    pub prev_close: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub timestamp: i64,
    pub volume: i64,
    pub turnover: String,
    pub trade_status: i32,
    pub warrant_extend: Option<WarrantExtendRow>,
}

impl WarrantQuoteRow {
    pub fn into_domain(self) -> Result<WarrantQuote, DecodeError> {
        Ok(WarrantQuote {
            symbol: Symbol::new(self.symbol),
            last_done: parse_decimal("lastDone", &self.last_done)?,
            prev_close: parse_decimal("prevClose", &self.prev_close)?,
            open: parse_decimal("open", &self.open)?,
            high: parse_decimal("high", &self.high)?,
            low: parse_decimal("low", &self.low)?,
            timestamp: self.timestamp,
            volume: self.volume,
            turnover: parse_decimal("turnover", &self.turnover)?,
            trade_status: self.trade_status.into(),
            warrant_extend: self.warrant_extend.map(WarrantExtendRow::into_domain).transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WarrantQuoteResponse {
    pub secu_quote: Vec<WarrantQuoteRow>,
}

impl WarrantQuoteResponse {
    pub fn into_domain(self) -> Result<Vec<WarrantQuote>, DecodeError> {
        self.secu_quote
            .into_iter()
            .map(WarrantQuoteRow::into_domain)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionChainDateListResponse {
    pub expiry_date: Vec<String>,
}

impl OptionChainDateListResponse {
    pub fn into_domain(self) -> Result<Vec<NaiveDate>, DecodeError> {
        parse_dates("expiryDate", &self.expiry_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrikePriceInfoRow {
    pub price: String,
    pub call_symbol: String,
    pub put_symbol: String,
    pub standard: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionChainDateStrikeInfoResponse {
    pub strike_price_info: Vec<StrikePriceInfoRow>,
}

impl OptionChainDateStrikeInfoResponse {
    pub fn into_domain(self) -> Result<Vec<StrikePriceInfo>, DecodeError> {
        self.strike_price_info
            .into_iter()
            .map(|row| {
                Ok(StrikePriceInfo {
                    price: parse_decimal("price", &row.price)?,
                    call_symbol: Symbol::new(row.call_symbol),
                    put_symbol: Symbol::new(row.put_symbol),
                    standard: row.standard,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssuerInfoRow {
    pub id: i32,
    pub name_cn: String,
    pub name_en: String,
    pub name_hk: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssuerInfoResponse {
    pub issuer_info: Vec<IssuerInfoRow>,
}

impl From<IssuerInfoResponse> for Vec<IssuerInfo> {
    fn from(resp: IssuerInfoResponse) -> Self {
        resp.issuer_info
            .into_iter()
            .map(|row| IssuerInfo {
                id: row.id,
                name_cn: row.name_cn,
                name_en: row.name_en,
                name_hk: row.name_hk,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradePeriodRow {
    pub beg_time: i32,
    pub end_time: i32,
    pub trade_session: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketTradePeriodRow {
    pub market: String,
    pub trade_session: Vec<TradePeriodRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketTradePeriodResponse {
    pub market_trade_session: Vec<MarketTradePeriodRow>,
}

impl From<MarketTradePeriodResponse> for Vec<MarketTradingSession> {
    fn from(resp: MarketTradePeriodResponse) -> Self {
        resp.market_trade_session
            .into_iter()
            .map(|row| MarketTradingSession {
                market: Market::from(row.market.as_str()),
                trade_sessions: row
                    .trade_session
                    .into_iter()
                    .map(|period| TradePeriod {
                        beg_time: period.beg_time,
                        end_time: period.end_time,
                        trade_session: period.trade_session.into(),
                    })
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketTradeDayResponse {
    pub trade_day: Vec<String>,
    pub half_trade_day: Vec<String>,
}

impl MarketTradeDayResponse {
    pub fn into_domain(self) -> Result<MarketTradingDay, DecodeError> {
        Ok(MarketTradingDay {
            trade_days: parse_dates("tradeDay", &self.trade_day)?,
            half_trade_days: parse_dates("halfTradeDay", &self.half_trade_day)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::decode;
    use rust_decimal::Decimal;

    #[test]
    fn test_candlestick_request_wire_shape() {
        let req = SecurityCandlestickRequest::new(
            &Symbol::new("700.HK"),
            Period::Day,
            30,
            AdjustType::Forward,
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"symbol": "700.HK", "period": 1000, "count": 30, "adjustType": 1})
        );
    }

    #[test]
    fn test_security_quote_with_pre_market() {
        let body = br#"{"secuQuote":[{
            "symbol":"AAPL.US","lastDone":"189.5","prevClose":"188","timestamp":1700000000,
            "volume":100,"tradeStatus":0,
            "preMarketQuote":{"lastDone":"190.1","timestamp":1699990000,"prevClose":"188"}
        }]}"#;
        let resp: SecurityQuoteResponse = decode("query_quote", body).unwrap();
        let quotes = resp.into_domain().unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].open, None);
        let pre = quotes[0].pre_market_quote.as_ref().unwrap();
        assert_eq!(pre.last_done, Some(Decimal::from_str_exact("190.1").unwrap()));
        assert!(quotes[0].post_market_quote.is_none());
    }

    #[test]
    fn test_static_info_bad_decimal() {
        let body = br#"{"secuStaticInfo":[{"symbol":"700.HK","eps":"abc"}]}"#;
        let resp: StaticInfoResponse = decode("query_static_info", body).unwrap();
        assert!(matches!(
            resp.into_domain(),
            Err(DecodeError::InvalidDecimal { .. })
        ));
    }

    #[test]
    fn test_participants_conversion() {
        let body = br#"{"participantBrokerNumbers":[{"brokerIds":[1,2],"participantNameEn":"Alpha"}]}"#;
        let resp: ParticipantsResponse = decode("query_participants", body).unwrap();
        let infos: Vec<ParticipantInfo> = resp.into();
        assert_eq!(infos[0].broker_ids, vec![1, 2]);
        assert_eq!(infos[0].name_en, "Alpha");
        assert_eq!(infos[0].name_cn, "");
    }

    #[test]
    fn test_brokers_response_conversion() {
        let body = br#"{"symbol":"700.HK","askBrokers":[{"position":1,"brokerIds":[7]}]}"#;
        let resp: SecurityBrokersResponse = decode("query_brokers", body).unwrap();
        let brokers = SecurityBrokers::from(resp);
        assert_eq!(brokers.symbol.as_str(), "700.HK");
        assert_eq!(brokers.ask_brokers[0].broker_ids, vec![7]);
        assert!(brokers.bid_brokers.is_empty());
    }

    #[test]
    fn test_history_by_offset_wire_shape() {
        let at = NaiveDate::from_ymd_opt(2022, 5, 10)
            .unwrap()
            .and_hms_opt(11, 10, 0)
            .unwrap();
        let req = HistoryCandlestickRequest::by_offset(
            &Symbol::new("AAPL.US"),
            Period::Day,
            AdjustType::NoAdjust,
            true,
            Some(at),
            100,
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "symbol": "AAPL.US", "period": 1000, "adjustType": 0, "queryType": 1,
                "offsetRequest": {"direction": 1, "date": "20220510", "minute": "1110", "count": 100}
            })
        );
    }

    #[test]
    fn test_history_by_date_open_ended() {
        let req = HistoryCandlestickRequest::by_date(
            &Symbol::new("700.HK"),
            Period::Week,
            AdjustType::Forward,
            NaiveDate::from_ymd_opt(2022, 5, 10),
            None,
        );
        assert_eq!(req.query_type, HISTORY_QUERY_BY_DATE);
        assert!(req.offset_request.is_none());
        let dates = req.date_request.unwrap();
        assert_eq!(dates.start_date, "20220510");
        assert_eq!(dates.end_date, "");
    }

    #[test]
    fn test_option_quote_extend_conversion() {
        let body = br#"{"secuQuote":[{
            "symbol":"AAPL240621C190000.US","lastDone":"3.2","tradeStatus":0,
            "optionExtend":{"impliedVolatility":"0.25","openInterest":1200,"expiryDate":"20240621",
                "strikePrice":"190","contractType":"A","direction":"C","underlyingSymbol":"AAPL.US"}
        }]}"#;
        let resp: OptionQuoteResponse = decode("query_option_quote", body).unwrap();
        let quotes = resp.into_domain().unwrap();
        let extend = quotes[0].option_extend.as_ref().unwrap();
        assert_eq!(extend.expiry_date, NaiveDate::from_ymd_opt(2024, 6, 21));
        assert_eq!(extend.strike_price, Some(Decimal::from(190)));
        assert_eq!(extend.contract_multiplier, None);
        assert_eq!(extend.underlying_symbol.as_str(), "AAPL.US");
    }

    #[test]
    fn test_trade_day_bad_date() {
        let body = br#"{"tradeDay":["20240102","2024/01/03"]}"#;
        let resp: MarketTradeDayResponse = decode("query_market_trade_day", body).unwrap();
        assert!(matches!(
            resp.into_domain(),
            Err(DecodeError::InvalidDate { .. })
        ));
    }
}

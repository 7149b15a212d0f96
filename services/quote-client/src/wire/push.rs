//! Push body DTOs and decoding

use serde::{Deserialize, Serialize};
use types::depth::{Brokers, Depth, PushBrokers, PushDepth};
use types::errors::DecodeError;
use types::ids::Symbol;
use types::numeric::parse_decimal;
use types::quote::PushQuote;
use types::trade::{PushTrade, Trade};

use super::decode;
use crate::events::PushEvent;
use crate::transport::{Command, Packet};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PushQuoteBody {
    pub symbol: String,
    pub sequence: i64,
    pub last_done: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub timestamp: i64,
    pub volume: i64,
    pub turnover: String,
    pub trade_status: i32,
    pub trade_session: i32,
}

impl PushQuoteBody {
    pub fn into_domain(self) -> Result<PushQuote, DecodeError> {
        Ok(PushQuote {
            symbol: require_symbol("push_quote", self.symbol)?,
            sequence: self.sequence,
            last_done: parse_decimal("lastDone", &self.last_done)?,
            open: parse_decimal("open", &self.open)?,
            high: parse_decimal("high", &self.high)?,
            low: parse_decimal("low", &self.low)?,
            timestamp: self.timestamp,
            volume: self.volume,
            turnover: parse_decimal("turnover", &self.turnover)?,
            trade_status: self.trade_status.into(),
            trade_session: self.trade_session.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DepthRow {
    pub position: i32,
    pub price: String,
    pub volume: i64,
    pub order_num: i64,
}

impl DepthRow {
    pub fn into_domain(self) -> Result<Depth, DecodeError> {
        Ok(Depth {
            position: self.position,
            price: parse_decimal("price", &self.price)?,
            volume: self.volume,
            order_num: self.order_num,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrokersRow {
    pub position: i32,
    pub broker_ids: Vec<i32>,
}

impl From<BrokersRow> for Brokers {
    fn from(row: BrokersRow) -> Self {
        Brokers {
            position: row.position,
            broker_ids: row.broker_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeRow {
    pub price: String,
    pub volume: i64,
    pub timestamp: i64,
    pub trade_type: String,
    pub direction: i32,
    pub trade_session: i32,
}

impl TradeRow {
    pub fn into_domain(self) -> Result<Trade, DecodeError> {
        Ok(Trade {
            price: parse_decimal("price", &self.price)?,
            volume: self.volume,
            timestamp: self.timestamp,
            trade_type: self.trade_type,
            direction: self.direction.into(),
            trade_session: self.trade_session.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PushDepthBody {
    pub symbol: String,
    pub sequence: i64,
    pub ask: Vec<DepthRow>,
    pub bid: Vec<DepthRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PushBrokersBody {
    pub symbol: String,
    pub sequence: i64,
    pub ask: Vec<BrokersRow>,
    pub bid: Vec<BrokersRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PushTradeBody {
    pub symbol: String,
    pub sequence: i64,
    pub trades: Vec<TradeRow>,
}

pub(crate) fn depth_rows(rows: Vec<DepthRow>) -> Result<Vec<Depth>, DecodeError> {
    rows.into_iter().map(DepthRow::into_domain).collect()
}

pub(crate) fn trade_rows(rows: Vec<TradeRow>) -> Result<Vec<Trade>, DecodeError> {
    rows.into_iter().map(TradeRow::into_domain).collect()
}

fn require_symbol(context: &str, raw: String) -> Result<Symbol, DecodeError> {
    Symbol::try_new(raw).ok_or_else(|| DecodeError::Malformed {
        context: context.to_string(),
        reason: "missing symbol".to_string(),
    })
}

/// Decode a pushed packet into exactly one typed event, chosen by command code.
pub fn decode_push(packet: &Packet) -> Result<PushEvent, DecodeError> {
    let command = Command::try_from(packet.command)?;
    let context = command.label();

    match command {
        Command::PushQuote => {
            let body: PushQuoteBody = decode(context, &packet.body)?;
            Ok(PushEvent::Quote(body.into_domain()?))
        }
        Command::PushDepth => {
            let body: PushDepthBody = decode(context, &packet.body)?;
            Ok(PushEvent::Depth(PushDepth {
                symbol: require_symbol(context, body.symbol)?,
                sequence: body.sequence,
                ask: depth_rows(body.ask)?,
                bid: depth_rows(body.bid)?,
            }))
        }
        Command::PushBrokers => {
            let body: PushBrokersBody = decode(context, &packet.body)?;
            Ok(PushEvent::Brokers(PushBrokers {
                symbol: require_symbol(context, body.symbol)?,
                sequence: body.sequence,
                ask_brokers: body.ask.into_iter().map(Brokers::from).collect(),
                bid_brokers: body.bid.into_iter().map(Brokers::from).collect(),
            }))
        }
        Command::PushTrade => {
            let body: PushTradeBody = decode(context, &packet.body)?;
            Ok(PushEvent::Trade(PushTrade {
                symbol: require_symbol(context, body.symbol)?,
                sequence: body.sequence,
                trades: trade_rows(body.trades)?,
            }))
        }
        other => Err(DecodeError::Malformed {
            context: other.label().to_string(),
            reason: "not a push command".to_string(),
        }),
    }
}

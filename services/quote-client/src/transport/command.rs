//! Wire command codes
//!
//! Every request/response call and every pushed message carries one of
//! these codes. Push codes are >= 100.

use std::fmt;

use types::errors::DecodeError;
use types::topic::Topic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Command {
    QuerySubscription,
    Subscribe,
    Unsubscribe,
    QueryMarketTradePeriod,
    QueryMarketTradeDay,
    QueryStaticInfo,
    QueryQuote,
    QueryOptionQuote,
    QueryWarrantQuote,
    QueryDepth,
    QueryBrokers,
    QueryParticipants,
    QueryTrade,
    QueryIntraday,
    QueryCandlestick,
    QueryOptionChainDate,
    QueryOptionChainDateStrikeInfo,
    QueryWarrantIssuerInfo,
    QueryHistoryCandlestick,
    PushQuote,
    PushDepth,
    PushBrokers,
    PushTrade,
}

impl Command {
    /// The four unsolicited push commands, in topic order.
    pub const PUSHES: [Command; 4] = [
        Command::PushQuote,
        Command::PushDepth,
        Command::PushBrokers,
        Command::PushTrade,
    ];

    pub fn code(self) -> u32 {
        match self {
            Command::QuerySubscription => 5,
            Command::Subscribe => 6,
            Command::Unsubscribe => 7,
            Command::QueryMarketTradePeriod => 8,
            Command::QueryMarketTradeDay => 9,
            Command::QueryStaticInfo => 10,
            Command::QueryQuote => 11,
            Command::QueryOptionQuote => 12,
            Command::QueryWarrantQuote => 13,
            Command::QueryDepth => 14,
            Command::QueryBrokers => 15,
            Command::QueryParticipants => 16,
            Command::QueryTrade => 17,
            Command::QueryIntraday => 18,
            Command::QueryCandlestick => 19,
            Command::QueryOptionChainDate => 20,
            Command::QueryOptionChainDateStrikeInfo => 21,
            Command::QueryWarrantIssuerInfo => 22,
            Command::QueryHistoryCandlestick => 27,
            Command::PushQuote => 101,
            Command::PushDepth => 102,
            Command::PushBrokers => 103,
            Command::PushTrade => 104,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Command::QuerySubscription => "query_subscription",
            Command::Subscribe => "subscribe",
            Command::Unsubscribe => "unsubscribe",
            Command::QueryMarketTradePeriod => "query_market_trade_period",
            Command::QueryMarketTradeDay => "query_market_trade_day",
            Command::QueryStaticInfo => "query_static_info",
            Command::QueryQuote => "query_quote",
            Command::QueryOptionQuote => "query_option_quote",
            Command::QueryWarrantQuote => "query_warrant_quote",
            Command::QueryDepth => "query_depth",
            Command::QueryBrokers => "query_brokers",
            Command::QueryParticipants => "query_participants",
            Command::QueryTrade => "query_trade",
            Command::QueryIntraday => "query_intraday",
            Command::QueryCandlestick => "query_candlestick",
            Command::QueryOptionChainDate => "query_option_chain_date",
            Command::QueryOptionChainDateStrikeInfo => "query_option_chain_date_strike_info",
            Command::QueryWarrantIssuerInfo => "query_warrant_issuer_info",
            Command::QueryHistoryCandlestick => "query_history_candlestick",
            Command::PushQuote => "push_quote",
            Command::PushDepth => "push_depth",
            Command::PushBrokers => "push_brokers",
            Command::PushTrade => "push_trade",
        }
    }

    pub fn is_push(self) -> bool {
        self.push_topic().is_some()
    }

    /// Topic carried by a push command.
    pub fn push_topic(self) -> Option<Topic> {
        match self {
            Command::PushQuote => Some(Topic::Quote),
            Command::PushDepth => Some(Topic::Depth),
            Command::PushBrokers => Some(Topic::Brokers),
            Command::PushTrade => Some(Topic::Trade),
            _ => None,
        }
    }
}

impl TryFrom<u32> for Command {
    type Error = DecodeError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        let command = match code {
            5 => Command::QuerySubscription,
            6 => Command::Subscribe,
            7 => Command::Unsubscribe,
            8 => Command::QueryMarketTradePeriod,
            9 => Command::QueryMarketTradeDay,
            10 => Command::QueryStaticInfo,
            11 => Command::QueryQuote,
            12 => Command::QueryOptionQuote,
            13 => Command::QueryWarrantQuote,
            14 => Command::QueryDepth,
            15 => Command::QueryBrokers,
            16 => Command::QueryParticipants,
            17 => Command::QueryTrade,
            18 => Command::QueryIntraday,
            19 => Command::QueryCandlestick,
            20 => Command::QueryOptionChainDate,
            21 => Command::QueryOptionChainDateStrikeInfo,
            22 => Command::QueryWarrantIssuerInfo,
            27 => Command::QueryHistoryCandlestick,
            101 => Command::PushQuote,
            102 => Command::PushDepth,
            103 => Command::PushBrokers,
            104 => Command::PushTrade,
            other => return Err(DecodeError::UnknownCommand(other)),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.label(), self.code())
    }
}

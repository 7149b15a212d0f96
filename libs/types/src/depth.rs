//! Order-book depth and broker-queue rows
//!
//! Both kinds are position-keyed: row `position` is the slot on the
//! ask or bid side (1 = best). The client keeps each side sorted
//! ascending by position.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::Symbol;

/// Rows that occupy a numbered slot in an ordered side list.
pub trait Positioned {
    fn position(&self) -> i32;
}

/// One depth level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Depth {
    pub position: i32,
    pub price: Option<Decimal>,
    pub volume: i64,
    pub order_num: i64,
}

impl Positioned for Depth {
    fn position(&self) -> i32 {
        self.position
    }
}

/// Broker ids queued at one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brokers {
    pub position: i32,
    pub broker_ids: Vec<i32>,
}

impl Positioned for Brokers {
    fn position(&self) -> i32 {
        self.position
    }
}

/// Depth update pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushDepth {
    pub symbol: Symbol,
    pub sequence: i64,
    pub ask: Vec<Depth>,
    pub bid: Vec<Depth>,
}

/// Broker-queue update pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushBrokers {
    pub symbol: Symbol,
    pub sequence: i64,
    pub ask_brokers: Vec<Brokers>,
    pub bid_brokers: Vec<Brokers>,
}

/// Both sides of the depth book for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityDepth {
    pub symbol: Symbol,
    pub ask: Vec<Depth>,
    pub bid: Vec<Depth>,
}

/// Both sides of the broker queue for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityBrokers {
    pub symbol: Symbol,
    pub ask_brokers: Vec<Brokers>,
    pub bid_brokers: Vec<Brokers>,
}

impl SecurityDepth {
    /// A book with no rows on either side.
    pub fn empty(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            ask: Vec::new(),
            bid: Vec::new(),
        }
    }
}

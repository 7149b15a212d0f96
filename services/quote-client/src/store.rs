//! Market data store
//!
//! Per-symbol cache of the latest quote, depth book, broker queue and
//! trade tape, fed by decoded pushes. Each kind sits behind its own
//! reader-writer lock, so a quote merge never blocks a depth read.
//!
//! Merge rules:
//! - Every kind is gated by the server sequence. A push whose sequence is
//!   not greater than the stored one is discarded unread.
//! - Quotes merge sparsely: unset prices and zero volume keep the stored
//!   value; timestamp, status, session and sequence always overwrite.
//! - Depth and broker rows are upserted by position, keeping each side
//!   sorted ascending.
//! - Trade batches are appended whole.
//!
//! Entries are created on the first push seen for a symbol and are never
//! evicted. Every read returns an owned copy.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;
use types::depth::{Brokers, Depth, Positioned, PushBrokers, PushDepth};
use types::ids::Symbol;
use types::quote::{PushQuote, Quote};
use types::topic::Topic;
use types::trade::{PushTrade, Trade};

use crate::events::PushEvent;
use crate::metrics::QuoteMetrics;

/// Stored sequence before any push has been accepted.
pub const INITIAL_SEQUENCE: i64 = -1;

/// Result of offering a push to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Applied,
    Stale { stored: i64, incoming: i64 },
}

impl MergeOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, MergeOutcome::Applied)
    }
}

/// Ask and bid lists for a position-keyed kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideBook<R> {
    pub sequence: i64,
    pub ask: Vec<R>,
    pub bid: Vec<R>,
}

impl<R> Default for SideBook<R> {
    fn default() -> Self {
        Self {
            sequence: INITIAL_SEQUENCE,
            ask: Vec::new(),
            bid: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeTape {
    pub sequence: i64,
    pub trades: Vec<Trade>,
}

impl Default for TradeTape {
    fn default() -> Self {
        Self {
            sequence: INITIAL_SEQUENCE,
            trades: Vec::new(),
        }
    }
}

/// Insert or replace each incoming row by position.
///
/// A row replaces the existing row with the same position, otherwise it
/// is inserted before the first row with a greater position, otherwise
/// appended. `list` must already be sorted ascending by position.
pub fn upsert_by_position<R: Positioned + Clone>(list: &mut Vec<R>, rows: &[R]) {
    for row in rows {
        match list.binary_search_by_key(&row.position(), Positioned::position) {
            Ok(idx) => list[idx] = row.clone(),
            Err(idx) => list.insert(idx, row.clone()),
        }
    }
}

pub struct MarketDataStore {
    quotes: RwLock<HashMap<Symbol, Quote>>,
    depths: RwLock<HashMap<Symbol, SideBook<Depth>>>,
    brokers: RwLock<HashMap<Symbol, SideBook<Brokers>>>,
    trades: RwLock<HashMap<Symbol, TradeTape>>,
    metrics: Arc<QuoteMetrics>,
}

impl MarketDataStore {
    pub fn new(metrics: Arc<QuoteMetrics>) -> Self {
        Self {
            quotes: RwLock::new(HashMap::new()),
            depths: RwLock::new(HashMap::new()),
            brokers: RwLock::new(HashMap::new()),
            trades: RwLock::new(HashMap::new()),
            metrics,
        }
    }

    /// Route a decoded push to the matching merge.
    pub fn handle_event(&self, event: &PushEvent) -> MergeOutcome {
        match event {
            PushEvent::Quote(e) => self.merge_quote(e),
            PushEvent::Depth(e) => self.merge_depth(e),
            PushEvent::Brokers(e) => self.merge_brokers(e),
            PushEvent::Trade(e) => self.merge_trade(e),
        }
    }

    pub fn merge_quote(&self, push: &PushQuote) -> MergeOutcome {
        let mut quotes = self.quotes.write();
        let stored = quotes
            .entry(push.symbol.clone())
            .or_insert_with(|| Quote::empty(push.symbol.clone()));

        if push.sequence <= stored.sequence {
            return self.stale(Topic::Quote, &push.symbol, stored.sequence, push.sequence);
        }

        if push.last_done.is_some() {
            stored.last_done = push.last_done;
        }
        if push.open.is_some() {
            stored.open = push.open;
        }
        if push.high.is_some() {
            stored.high = push.high;
        }
        if push.low.is_some() {
            stored.low = push.low;
        }
        if push.turnover.is_some() {
            stored.turnover = push.turnover;
        }
        if push.volume != 0 {
            stored.volume = push.volume;
        }
        stored.timestamp = push.timestamp;
        stored.trade_status = push.trade_status;
        stored.trade_session = push.trade_session;
        stored.sequence = push.sequence;

        self.metrics.record_merge();
        MergeOutcome::Applied
    }

    pub fn merge_depth(&self, push: &PushDepth) -> MergeOutcome {
        let mut depths = self.depths.write();
        let book = depths.entry(push.symbol.clone()).or_default();

        if push.sequence <= book.sequence {
            return self.stale(Topic::Depth, &push.symbol, book.sequence, push.sequence);
        }

        book.sequence = push.sequence;
        upsert_by_position(&mut book.ask, &push.ask);
        upsert_by_position(&mut book.bid, &push.bid);

        self.metrics.record_merge();
        MergeOutcome::Applied
    }

    pub fn merge_brokers(&self, push: &PushBrokers) -> MergeOutcome {
        let mut brokers = self.brokers.write();
        let book = brokers.entry(push.symbol.clone()).or_default();

        if push.sequence <= book.sequence {
            return self.stale(Topic::Brokers, &push.symbol, book.sequence, push.sequence);
        }

        book.sequence = push.sequence;
        upsert_by_position(&mut book.ask, &push.ask_brokers);
        upsert_by_position(&mut book.bid, &push.bid_brokers);

        self.metrics.record_merge();
        MergeOutcome::Applied
    }

    /// Append a trade batch. The batch is gated as a whole by its sequence.
    pub fn merge_trade(&self, push: &PushTrade) -> MergeOutcome {
        let mut trades = self.trades.write();
        let tape = trades.entry(push.symbol.clone()).or_default();

        if push.sequence <= tape.sequence {
            return self.stale(Topic::Trade, &push.symbol, tape.sequence, push.sequence);
        }

        tape.sequence = push.sequence;
        tape.trades.extend(push.trades.iter().cloned());

        self.metrics.record_merge();
        MergeOutcome::Applied
    }

    fn stale(&self, topic: Topic, symbol: &Symbol, stored: i64, incoming: i64) -> MergeOutcome {
        debug!(
            symbol = %symbol,
            kind = topic.label(),
            stored,
            incoming,
            "Discarding stale push"
        );
        self.metrics.record_stale();
        MergeOutcome::Stale { stored, incoming }
    }

    // -- Reads --------------------------------------------------------------

    pub fn get_quote(&self, symbol: &str) -> Option<Quote> {
        self.quotes.read().get(symbol).cloned()
    }

    /// Returns `(ask, bid)`; both empty when the symbol has no depth.
    pub fn get_depth(&self, symbol: &str) -> (Vec<Depth>, Vec<Depth>) {
        self.depths
            .read()
            .get(symbol)
            .map(|book| (book.ask.clone(), book.bid.clone()))
            .unwrap_or_default()
    }

    /// Returns `(ask_brokers, bid_brokers)`.
    pub fn get_brokers(&self, symbol: &str) -> (Vec<Brokers>, Vec<Brokers>) {
        self.brokers
            .read()
            .get(symbol)
            .map(|book| (book.ask.clone(), book.bid.clone()))
            .unwrap_or_default()
    }

    pub fn get_trades(&self, symbol: &str) -> Vec<Trade> {
        self.trades
            .read()
            .get(symbol)
            .map(|tape| tape.trades.clone())
            .unwrap_or_default()
    }

    /// The last `count` trades, oldest first. `count == 0` returns the whole tape.
    pub fn get_recent_trades(&self, symbol: &str, count: usize) -> Vec<Trade> {
        let trades = self.trades.read();
        match trades.get(symbol) {
            Some(tape) if count > 0 => {
                let start = tape.trades.len().saturating_sub(count);
                tape.trades[start..].to_vec()
            }
            Some(tape) => tape.trades.clone(),
            None => Vec::new(),
        }
    }

    /// Stored sequence for `(symbol, topic)`, or `None` before the first push.
    pub fn sequence_of(&self, topic: Topic, symbol: &str) -> Option<i64> {
        match topic {
            Topic::Quote => self.quotes.read().get(symbol).map(|q| q.sequence),
            Topic::Depth => self.depths.read().get(symbol).map(|b| b.sequence),
            Topic::Brokers => self.brokers.read().get(symbol).map(|b| b.sequence),
            Topic::Trade => self.trades.read().get(symbol).map(|t| t.sequence),
        }
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new(Arc::new(QuoteMetrics::new()))
    }
}

//! Counters for the quote client
//!
//! Tracks pushes received per kind, decode failures, stale discards,
//! merges applied and resubscribe outcomes. Shared by `Arc` between the
//! store, the dispatcher and the coordinator of one client instance.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use types::topic::Topic;

#[derive(Debug, Default)]
pub struct QuoteMetrics {
    // Pushes
    pub quote_pushes: AtomicU64,
    pub depth_pushes: AtomicU64,
    pub brokers_pushes: AtomicU64,
    pub trade_pushes: AtomicU64,
    pub decode_failures: AtomicU64,

    // Store
    pub merges_applied: AtomicU64,
    pub stale_discards: AtomicU64,

    // Reconnect
    pub resubscribe_attempts: AtomicU64,
    pub resubscribe_failures: AtomicU64,
}

impl QuoteMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully decoded push.
    pub fn record_push(&self, topic: Topic) {
        let counter = match topic {
            Topic::Quote => &self.quote_pushes,
            Topic::Depth => &self.depth_pushes,
            Topic::Brokers => &self.brokers_pushes,
            Topic::Trade => &self.trade_pushes,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_merge(&self) {
        self.merges_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale(&self) {
        self.stale_discards.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one resubscribe call and whether it failed.
    pub fn record_resubscribe(&self, failed: bool) {
        self.resubscribe_attempts.fetch_add(1, Ordering::Relaxed);
        if failed {
            self.resubscribe_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            quote_pushes: self.quote_pushes.load(Ordering::Relaxed),
            depth_pushes: self.depth_pushes.load(Ordering::Relaxed),
            brokers_pushes: self.brokers_pushes.load(Ordering::Relaxed),
            trade_pushes: self.trade_pushes.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            merges_applied: self.merges_applied.load(Ordering::Relaxed),
            stale_discards: self.stale_discards.load(Ordering::Relaxed),
            resubscribe_attempts: self.resubscribe_attempts.load(Ordering::Relaxed),
            resubscribe_failures: self.resubscribe_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub quote_pushes: u64,
    pub depth_pushes: u64,
    pub brokers_pushes: u64,
    pub trade_pushes: u64,
    pub decode_failures: u64,
    pub merges_applied: u64,
    pub stale_discards: u64,
    pub resubscribe_attempts: u64,
    pub resubscribe_failures: u64,
}

impl MetricsSnapshot {
    pub fn total_pushes(&self) -> u64 {
        self.quote_pushes + self.depth_pushes + self.brokers_pushes + self.trade_pushes
    }

    /// Export as name → value for exposition.
    pub fn export(&self) -> BTreeMap<String, u64> {
        let mut m = BTreeMap::new();
        m.insert("quote_pushes".to_string(), self.quote_pushes);
        m.insert("depth_pushes".to_string(), self.depth_pushes);
        m.insert("brokers_pushes".to_string(), self.brokers_pushes);
        m.insert("trade_pushes".to_string(), self.trade_pushes);
        m.insert("decode_failures".to_string(), self.decode_failures);
        m.insert("merges_applied".to_string(), self.merges_applied);
        m.insert("stale_discards".to_string(), self.stale_discards);
        m.insert("resubscribe_attempts".to_string(), self.resubscribe_attempts);
        m.insert("resubscribe_failures".to_string(), self.resubscribe_failures);
        m
    }
}

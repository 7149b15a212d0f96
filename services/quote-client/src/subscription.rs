//! Subscription coordinator
//!
//! Owns the local map of symbol → subscribed topics, issues subscribe and
//! unsubscribe calls, and replays the map after the transport reconnects.
//!
//! Lock discipline:
//! - `op_gate` (async) serializes Subscribe/Unsubscribe, each held across
//!   its request and the map update that follows it.
//! - `subscriptions` (sync) is only held for in-memory reads and writes,
//!   never across an await. Resubscribe snapshots the map under it and
//!   issues its calls outside, so it neither blocks nor is blocked by a
//!   concurrent Subscribe for the length of the replay.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use futures::FutureExt;
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use types::errors::QuoteError;
use types::ids::Symbol;
use types::topic::{Topic, TopicSet};

use crate::metrics::QuoteMetrics;
use crate::transport::{call, Command, QuoteTransport};
use crate::wire::{decode, encode, SubscribeRequest, SubscriptionResponse, UnsubscribeRequest};

/// Outcome of replaying the subscription map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResubscribeReport {
    /// Number of per-symbol subscribe calls issued.
    pub attempted: usize,
    pub failed: Vec<(Symbol, QuoteError)>,
}

impl ResubscribeReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct SubscriptionCoordinator {
    transport: Arc<dyn QuoteTransport>,
    subscriptions: Mutex<BTreeMap<Symbol, TopicSet>>,
    op_gate: tokio::sync::Mutex<()>,
    request_timeout: Duration,
    metrics: Arc<QuoteMetrics>,
}

impl SubscriptionCoordinator {
    pub fn new(
        transport: Arc<dyn QuoteTransport>,
        request_timeout: Duration,
        metrics: Arc<QuoteMetrics>,
    ) -> Self {
        Self {
            transport,
            subscriptions: Mutex::new(BTreeMap::new()),
            op_gate: tokio::sync::Mutex::new(()),
            request_timeout,
            metrics,
        }
    }

    /// Register `resubscribe` as the transport's reconnect hook.
    ///
    /// The hook holds a weak reference; once the coordinator is dropped it
    /// does nothing.
    pub fn attach(self: &Arc<Self>) {
        let weak: Weak<Self> = Arc::downgrade(self);
        self.transport.after_reconnect(Arc::new(move || {
            let weak = weak.clone();
            async move {
                if let Some(coordinator) = weak.upgrade() {
                    coordinator.resubscribe().await;
                }
            }
            .boxed()
        }));
    }

    pub async fn subscribe(
        &self,
        symbols: &[Symbol],
        topics: &[Topic],
        is_first_push: bool,
    ) -> Result<(), QuoteError> {
        self.subscribe_with_timeout(symbols, topics, is_first_push, self.request_timeout)
            .await
    }

    /// Subscribe `symbols` to exactly `topics`, replacing any previously
    /// recorded set for those symbols. The local map is untouched on failure.
    pub async fn subscribe_with_timeout(
        &self,
        symbols: &[Symbol],
        topics: &[Topic],
        is_first_push: bool,
        timeout: Duration,
    ) -> Result<(), QuoteError> {
        if symbols.is_empty() {
            return Ok(());
        }

        let _op = self.op_gate.lock().await;
        self.send_subscribe(symbols, topics, is_first_push, timeout)
            .await?;

        let topic_set: TopicSet = topics.iter().copied().collect();
        {
            let mut subscriptions = self.subscriptions.lock();
            for symbol in symbols {
                // An empty set replaces the old one, so the symbol goes.
                if topic_set.is_empty() {
                    subscriptions.remove(symbol);
                } else {
                    subscriptions.insert(symbol.clone(), topic_set.clone());
                }
            }
        }

        info!(
            symbols = symbols.len(),
            topics = ?topic_set,
            is_first_push,
            "Subscribed"
        );
        Ok(())
    }

    pub async fn unsubscribe(
        &self,
        symbols: &[Symbol],
        topics: &[Topic],
        unsubscribe_all: bool,
    ) -> Result<(), QuoteError> {
        self.unsubscribe_with_timeout(symbols, topics, unsubscribe_all, self.request_timeout)
            .await
    }

    /// Unsubscribe on the server, then drop the listed symbols from the
    /// local map entirely (or clear it when `unsubscribe_all`). `topics` is
    /// forwarded to the server but does not narrow the local removal.
    pub async fn unsubscribe_with_timeout(
        &self,
        symbols: &[Symbol],
        topics: &[Topic],
        unsubscribe_all: bool,
        timeout: Duration,
    ) -> Result<(), QuoteError> {
        let _op = self.op_gate.lock().await;

        let body = encode(
            Command::Unsubscribe.label(),
            &UnsubscribeRequest::new(symbols, topics, unsubscribe_all),
        )?;
        call(self.transport.as_ref(), Command::Unsubscribe, body, timeout).await?;

        let remaining = {
            let mut subscriptions = self.subscriptions.lock();
            if unsubscribe_all {
                subscriptions.clear();
            } else {
                for symbol in symbols {
                    subscriptions.remove(symbol);
                }
            }
            subscriptions.len()
        };

        info!(
            symbols = symbols.len(),
            unsubscribe_all,
            remaining,
            "Unsubscribed"
        );
        Ok(())
    }

    /// Ask the server for its view of the current subscriptions.
    pub async fn subscriptions(&self) -> Result<BTreeMap<Symbol, Vec<Topic>>, QuoteError> {
        let body = encode(Command::QuerySubscription.label(), &serde_json::json!({}))?;
        let reply = call(
            self.transport.as_ref(),
            Command::QuerySubscription,
            body,
            self.request_timeout,
        )
        .await?;
        let response: SubscriptionResponse = decode(Command::QuerySubscription.label(), &reply)?;
        Ok(response.into_map())
    }

    /// Copy of the locally recorded map.
    pub fn local_subscriptions(&self) -> BTreeMap<Symbol, TopicSet> {
        self.subscriptions.lock().clone()
    }

    /// Re-issue one subscribe call per recorded symbol, with `is_first_push`
    /// set. A failed symbol is logged and skipped; the rest still run. The
    /// map is not rewritten, so an Unsubscribe racing the replay stands.
    pub async fn resubscribe(&self) -> ResubscribeReport {
        let snapshot: Vec<(Symbol, Vec<Topic>)> = {
            let subscriptions = self.subscriptions.lock();
            subscriptions
                .iter()
                .map(|(symbol, topics)| (symbol.clone(), topics.iter().copied().collect()))
                .collect()
        };

        let mut report = ResubscribeReport::default();
        for (symbol, topics) in snapshot {
            report.attempted += 1;
            let result = self
                .send_subscribe(std::slice::from_ref(&symbol), &topics, true, self.request_timeout)
                .await;
            self.metrics.record_resubscribe(result.is_err());

            match result {
                Ok(()) => debug!(symbol = %symbol, topics = ?topics, "Resubscribed"),
                Err(err) => {
                    warn!(symbol = %symbol, error = %err, "Resubscribe failed");
                    report.failed.push((symbol, err));
                }
            }
        }

        info!(
            attempted = report.attempted,
            failed = report.failed.len(),
            "Resubscribe complete"
        );
        report
    }

    async fn send_subscribe(
        &self,
        symbols: &[Symbol],
        topics: &[Topic],
        is_first_push: bool,
        timeout: Duration,
    ) -> Result<(), QuoteError> {
        let body = encode(
            Command::Subscribe.label(),
            &SubscribeRequest::new(symbols, topics, is_first_push),
        )?;
        call(self.transport.as_ref(), Command::Subscribe, body, timeout).await?;
        Ok(())
    }
}

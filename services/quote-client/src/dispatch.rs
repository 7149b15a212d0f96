//! Push dispatcher
//!
//! Decodes each pushed packet into a `PushEvent`, merges it into the
//! store, then hands the decoded event to the callback registered for its
//! kind. The callback sees what the server sent, even when the store
//! discarded it as stale. Undecodable packets are logged and dropped.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{trace, warn};
use types::depth::{PushBrokers, PushDepth};
use types::quote::PushQuote;
use types::trade::PushTrade;

use crate::events::PushEvent;
use crate::metrics::QuoteMetrics;
use crate::store::MarketDataStore;
use crate::transport::{Command, Packet, QuoteTransport};
use crate::wire::decode_push;

pub type QuoteHandler = Arc<dyn Fn(&PushQuote) + Send + Sync>;
pub type DepthHandler = Arc<dyn Fn(&PushDepth) + Send + Sync>;
pub type BrokersHandler = Arc<dyn Fn(&PushBrokers) + Send + Sync>;
pub type TradeHandler = Arc<dyn Fn(&PushTrade) + Send + Sync>;

pub struct PushDispatcher {
    store: Arc<MarketDataStore>,
    metrics: Arc<QuoteMetrics>,
    on_quote: RwLock<Option<QuoteHandler>>,
    on_depth: RwLock<Option<DepthHandler>>,
    on_brokers: RwLock<Option<BrokersHandler>>,
    on_trade: RwLock<Option<TradeHandler>>,
}

impl PushDispatcher {
    pub fn new(store: Arc<MarketDataStore>, metrics: Arc<QuoteMetrics>) -> Self {
        Self {
            store,
            metrics,
            on_quote: RwLock::new(None),
            on_depth: RwLock::new(None),
            on_brokers: RwLock::new(None),
            on_trade: RwLock::new(None),
        }
    }

    /// Register this dispatcher as the handler for all four push commands.
    pub fn attach(self: &Arc<Self>, transport: &dyn QuoteTransport) {
        for command in Command::PUSHES {
            let dispatcher = Arc::clone(self);
            transport.on_push(
                command,
                Arc::new(move |packet: Packet| dispatcher.handle_packet(&packet)),
            );
        }
    }

    /// Replaces any previous quote callback.
    pub fn set_quote_handler(&self, handler: QuoteHandler) {
        *self.on_quote.write() = Some(handler);
    }

    pub fn set_depth_handler(&self, handler: DepthHandler) {
        *self.on_depth.write() = Some(handler);
    }

    pub fn set_brokers_handler(&self, handler: BrokersHandler) {
        *self.on_brokers.write() = Some(handler);
    }

    pub fn set_trade_handler(&self, handler: TradeHandler) {
        *self.on_trade.write() = Some(handler);
    }

    pub fn store(&self) -> &Arc<MarketDataStore> {
        &self.store
    }

    /// Decode and dispatch one pushed packet. Never panics on bad input.
    pub fn handle_packet(&self, packet: &Packet) {
        match decode_push(packet) {
            Ok(event) => self.dispatch(&event),
            Err(err) => {
                self.metrics.record_decode_failure();
                warn!(
                    command = packet.command,
                    body_len = packet.body.len(),
                    error = %err,
                    "Dropping undecodable push"
                );
            }
        }
    }

    /// Merge the event into the store, then invoke the callback for its kind.
    pub fn dispatch(&self, event: &PushEvent) {
        self.metrics.record_push(event.topic());

        let outcome = self.store.handle_event(event);
        trace!(
            symbol = %event.symbol(),
            sequence = event.sequence(),
            event_type = event.event_type_label(),
            applied = outcome.is_applied(),
            "Dispatched push"
        );

        // Clone the handler out so the slot lock is not held during the call.
        match event {
            PushEvent::Quote(e) => {
                let handler = self.on_quote.read().clone();
                if let Some(handler) = handler {
                    handler(e);
                }
            }
            PushEvent::Depth(e) => {
                let handler = self.on_depth.read().clone();
                if let Some(handler) = handler {
                    handler(e);
                }
            }
            PushEvent::Brokers(e) => {
                let handler = self.on_brokers.read().clone();
                if let Some(handler) = handler {
                    handler(e);
                }
            }
            PushEvent::Trade(e) => {
                let handler = self.on_trade.read().clone();
                if let Some(handler) = handler {
                    handler(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use types::topic::Topic;

    fn dispatcher() -> (Arc<PushDispatcher>, Arc<QuoteMetrics>) {
        let metrics = Arc::new(QuoteMetrics::new());
        let store = Arc::new(MarketDataStore::new(Arc::clone(&metrics)));
        (
            Arc::new(PushDispatcher::new(store, Arc::clone(&metrics))),
            metrics,
        )
    }

    fn quote_packet(seq: i64, last_done: &str) -> Packet {
        let body = json!({"symbol": "700.HK", "sequence": seq, "lastDone": last_done});
        Packet::new(Command::PushQuote, serde_json::to_vec(&body).unwrap())
    }

    #[test]
    fn test_callback_sees_stale_event() {
        let (dispatcher, metrics) = dispatcher();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        dispatcher.set_quote_handler(Arc::new(move |q: &PushQuote| {
            sink.lock().push((q.sequence, q.last_done));
        }));

        dispatcher.handle_packet(&quote_packet(5, "10"));
        dispatcher.handle_packet(&quote_packet(3, "9"));

        let seen = seen.lock().clone();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].0, 3);

        // Store kept the newer value
        let stored = dispatcher.store().get_quote("700.HK").unwrap();
        assert_eq!(stored.sequence, 5);
        assert_eq!(metrics.snapshot().stale_discards, 1);
    }

    #[test]
    fn test_decode_failure_is_dropped() {
        let (dispatcher, metrics) = dispatcher();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        dispatcher.set_quote_handler(Arc::new(move |_: &PushQuote| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        dispatcher.handle_packet(&Packet::new(Command::PushQuote, b"{broken".to_vec()));
        dispatcher.handle_packet(&Packet {
            command: 999,
            body: b"{}".to_vec(),
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(metrics.snapshot().decode_failures, 2);
        assert!(dispatcher.store().get_quote("700.HK").is_none());
    }

    #[test]
    fn test_handler_replaced_on_reregistration() {
        let (dispatcher, _) = dispatcher();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&first);
        dispatcher.set_quote_handler(Arc::new(move |_: &PushQuote| {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        let c = Arc::clone(&second);
        dispatcher.set_quote_handler(Arc::new(move |_: &PushQuote| {
            c.fetch_add(1, Ordering::SeqCst);
        }));

        dispatcher.handle_packet(&quote_packet(1, "10"));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_no_handler_still_merges() {
        let (dispatcher, metrics) = dispatcher();
        dispatcher.handle_packet(&quote_packet(1, "10"));
        assert!(dispatcher.store().get_quote("700.HK").is_some());
        assert_eq!(metrics.snapshot().quote_pushes, 1);
    }

    #[test]
    fn test_handler_may_reregister_from_inside_callback() {
        let (dispatcher, _) = dispatcher();
        let inner = Arc::clone(&dispatcher);
        dispatcher.set_trade_handler(Arc::new(move |_: &PushTrade| {
            inner.set_trade_handler(Arc::new(|_: &PushTrade| {}));
        }));

        let body = json!({"symbol": "700.HK", "sequence": 1, "trades": []});
        dispatcher.handle_packet(&Packet::new(
            Command::PushTrade,
            serde_json::to_vec(&body).unwrap(),
        ));
    }

    #[test]
    fn test_attach_registers_all_push_commands() {
        let (dispatcher, metrics) = dispatcher();
        let transport = crate::transport::MockTransport::new();
        dispatcher.attach(&transport);

        for command in Command::PUSHES {
            assert!(transport.has_push_handler(command));
        }
        let body = json!({"symbol": "700.HK", "sequence": 1, "ask": [{"position": 1, "price": "10"}]});
        assert!(transport.push_json(Command::PushDepth, &body));
        assert_eq!(metrics.snapshot().depth_pushes, 1);
        assert_eq!(
            dispatcher.store().sequence_of(Topic::Depth, "700.HK"),
            Some(1)
        );
    }
}

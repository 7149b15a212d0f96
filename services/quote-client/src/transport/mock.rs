//! In-process transport for tests and demos
//!
//! Records every request, answers from scripted replies (or a responder
//! closure), delivers pushes to the registered handlers and fires the
//! reconnect hooks on demand.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use types::errors::TransportError;

use super::{Command, Packet, PushHandler, QuoteTransport, ReconnectHook};

/// Computes a reply from the request when no scripted reply is queued.
pub type Responder = Arc<dyn Fn(Command, &[u8]) -> Result<Vec<u8>, TransportError> + Send + Sync>;

/// A request as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub command: Command,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_slice(&self.body).ok()
    }
}

#[derive(Default)]
struct MockState {
    requests: Vec<RecordedRequest>,
    replies: HashMap<Command, VecDeque<Result<Vec<u8>, TransportError>>>,
    responder: Option<Responder>,
    push_handlers: HashMap<Command, PushHandler>,
    reconnect_hooks: Vec<ReconnectHook>,
    latency: Option<Duration>,
}

#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next request with this command.
    pub fn enqueue_reply(&self, command: Command, reply: Result<Vec<u8>, TransportError>) {
        self.state
            .lock()
            .replies
            .entry(command)
            .or_default()
            .push_back(reply);
    }

    /// Queue a JSON reply for the next request with this command.
    pub fn enqueue_json<T: Serialize>(&self, command: Command, reply: &T) {
        let body = serde_json::to_vec(reply).unwrap_or_default();
        self.enqueue_reply(command, Ok(body));
    }

    pub fn set_responder<F>(&self, responder: F)
    where
        F: Fn(Command, &[u8]) -> Result<Vec<u8>, TransportError> + Send + Sync + 'static,
    {
        self.state.lock().responder = Some(Arc::new(responder));
    }

    /// Delay every reply by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.state.lock().latency = Some(latency);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    pub fn requests_for(&self, command: Command) -> Vec<RecordedRequest> {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.command == command)
            .cloned()
            .collect()
    }

    pub fn clear_requests(&self) {
        self.state.lock().requests.clear();
    }

    pub fn has_push_handler(&self, command: Command) -> bool {
        self.state.lock().push_handlers.contains_key(&command)
    }

    /// Deliver a packet to its handler on the calling thread.
    ///
    /// Returns false when no handler is registered for the packet's command.
    pub fn push(&self, packet: Packet) -> bool {
        let handler = match Command::try_from(packet.command) {
            Ok(command) => self.state.lock().push_handlers.get(&command).cloned(),
            Err(_) => None,
        };
        match handler {
            Some(handler) => {
                handler(packet);
                true
            }
            None => false,
        }
    }

    pub fn push_json<T: Serialize>(&self, command: Command, body: &T) -> bool {
        let body = serde_json::to_vec(body).unwrap_or_default();
        self.push(Packet::new(command, body))
    }

    /// Simulate a silent reconnect: run every reconnect hook to completion.
    ///
    /// Returns the number of hooks run.
    pub async fn reconnect(&self) -> usize {
        let hooks = self.state.lock().reconnect_hooks.clone();
        for hook in &hooks {
            hook().await;
        }
        hooks.len()
    }
}

#[async_trait]
impl QuoteTransport for MockTransport {
    async fn request(&self, command: Command, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let latency = {
            let mut state = self.state.lock();
            state.requests.push(RecordedRequest {
                command,
                body: body.clone(),
            });
            state.latency
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.state.lock();
        if let Some(reply) = state.replies.get_mut(&command).and_then(|q| q.pop_front()) {
            return reply;
        }
        let responder = state.responder.clone();
        drop(state);
        match responder {
            Some(responder) => responder(command, &body),
            None => Ok(b"{}".to_vec()),
        }
    }

    fn on_push(&self, command: Command, handler: PushHandler) {
        self.state.lock().push_handlers.insert(command, handler);
    }

    fn after_reconnect(&self, hook: ReconnectHook) {
        self.state.lock().reconnect_hooks.push(hook);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_scripted_replies_are_consumed_in_order() {
        let transport = MockTransport::new();
        transport.enqueue_reply(Command::Subscribe, Err(TransportError::Closed));
        transport.enqueue_reply(Command::Subscribe, Ok(b"ok".to_vec()));

        assert_eq!(
            transport.request(Command::Subscribe, Vec::new()).await,
            Err(TransportError::Closed)
        );
        assert_eq!(
            transport.request(Command::Subscribe, Vec::new()).await,
            Ok(b"ok".to_vec())
        );
        // Falls back to an empty object
        assert_eq!(
            transport.request(Command::Subscribe, Vec::new()).await,
            Ok(b"{}".to_vec())
        );
        assert_eq!(transport.requests_for(Command::Subscribe).len(), 3);
    }

    #[test]
    fn test_push_without_handler_is_not_delivered() {
        let transport = MockTransport::new();
        assert!(!transport.push(Packet::new(Command::PushQuote, Vec::new())));
        assert!(!transport.push(Packet {
            command: 999,
            body: Vec::new(),
        }));
    }

    #[test]
    fn test_push_reaches_registered_handler() {
        let transport = MockTransport::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        transport.on_push(
            Command::PushDepth,
            Arc::new(move |packet: Packet| {
                assert_eq!(packet.command, 102);
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(transport.push(Packet::new(Command::PushDepth, Vec::new())));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reconnect_runs_hooks() {
        let transport = MockTransport::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        transport.after_reconnect(Arc::new(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            .boxed()
        }));

        assert_eq!(transport.reconnect().await, 1);
        assert_eq!(transport.reconnect().await, 1);
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}

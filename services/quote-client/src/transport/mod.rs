//! Transport channel seam
//!
//! The quote client does not own the connection. It consumes an
//! already-connected duplex channel that offers:
//! - a request/response call keyed by command code,
//! - a handler slot for unsolicited pushes keyed by command code,
//! - a hook invoked after the channel silently reconnects.
//!
//! Handshake, framing, compression and dial retries live behind this trait.

pub mod command;
pub mod mock;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use tracing::debug;
use types::errors::{QuoteError, TransportError};

pub use command::Command;
pub use mock::{MockTransport, RecordedRequest};

/// An unsolicited message pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Raw command code; may be one the client does not know.
    pub command: u32,
    pub body: Vec<u8>,
}

impl Packet {
    pub fn new(command: Command, body: Vec<u8>) -> Self {
        Self {
            command: command.code(),
            body,
        }
    }
}

/// Called once per inbound push, on the transport's own execution context.
pub type PushHandler = Arc<dyn Fn(Packet) + Send + Sync>;

/// Called once per successful reconnect. The transport drives the returned future.
pub type ReconnectHook = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

#[async_trait]
pub trait QuoteTransport: Send + Sync {
    /// Synchronous request/response call.
    async fn request(&self, command: Command, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;

    /// Register the handler for pushes with this command. Replaces any previous handler.
    fn on_push(&self, command: Command, handler: PushHandler);

    /// Register a hook to run after every successful reconnect.
    fn after_reconnect(&self, hook: ReconnectHook);
}

/// Issue a request bounded by `timeout`, mapping failures to `QuoteError::Protocol`.
///
/// Dropping the returned future abandons the call.
pub async fn call(
    transport: &dyn QuoteTransport,
    command: Command,
    body: Vec<u8>,
    timeout: Duration,
) -> Result<Vec<u8>, QuoteError> {
    debug!(command = command.label(), body_len = body.len(), "Sending request");

    match tokio::time::timeout(timeout, transport.request(command, body)).await {
        Ok(Ok(reply)) => Ok(reply),
        Ok(Err(err)) => Err(QuoteError::protocol(command.label(), err)),
        Err(_) => Err(QuoteError::protocol(
            command.label(),
            TransportError::Timeout {
                millis: timeout.as_millis() as u64,
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_call_returns_reply() {
        let transport = MockTransport::new();
        transport.enqueue_reply(Command::QueryQuote, Ok(b"{}".to_vec()));

        let reply = call(&transport, Command::QueryQuote, Vec::new(), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(reply, b"{}".to_vec());
    }

    #[tokio::test]
    async fn test_call_wraps_transport_error() {
        let transport = MockTransport::new();
        transport.enqueue_reply(Command::Subscribe, Err(TransportError::Closed));

        let err = call(&transport, Command::Subscribe, Vec::new(), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err, QuoteError::protocol("subscribe", TransportError::Closed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_times_out() {
        let transport = MockTransport::new();
        transport.set_latency(Duration::from_secs(10));

        let err = call(
            &transport,
            Command::Unsubscribe,
            Vec::new(),
            Duration::from_millis(250),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.transport_error(),
            Some(&TransportError::Timeout { millis: 250 })
        );
    }
}

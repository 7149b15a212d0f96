//! Quote Client
//!
//! Keeps a local, continuously updated mirror of streaming market data
//! delivered over an already-connected transport:
//! - Tracks which symbols and topics are subscribed
//! - Decodes pushes and fans them out to user callbacks
//! - Merges pushes into a per-symbol cache with sequence-based staleness
//!   rejection and position-ordered list reconciliation
//! - Replays subscriptions after the transport silently reconnects
//!
//! # Architecture
//!
//! ```text
//!        Transport (request / push / reconnect)
//!          │               │              │
//!     ┌────▼─────┐   ┌─────▼─────┐   ┌────▼──────┐
//!     │ Context  │   │ Dispatch  │   │Subscribe  │
//!     │ queries  │   │  decode   │   │ replay    │
//!     └────┬─────┘   └──┬─────┬──┘   └───────────┘
//!          │            │     │
//!          │      ┌─────▼──┐ ┌▼──────────┐
//!          └─────►│ Store  │ │ Callbacks │
//!        realtime │        │ └───────────┘
//!                 └────────┘
//! ```

pub mod config;
pub mod context;
pub mod dispatch;
pub mod events;
pub mod logging;
pub mod metrics;
pub mod store;
pub mod subscription;
pub mod transport;
pub mod wire;

pub use config::QuoteConfig;
pub use context::QuoteContext;
pub use events::PushEvent;
pub use metrics::{MetricsSnapshot, QuoteMetrics};
pub use store::{MarketDataStore, MergeOutcome};
pub use subscription::{ResubscribeReport, SubscriptionCoordinator};
pub use transport::{Command, MockTransport, Packet, QuoteTransport};

// Library version
pub const CLIENT_VERSION: &str = "0.1.0";

//! Push event definitions
//!
//! `PushEvent` is the decoded form of one unsolicited server message.
//! Every variant carries the symbol it concerns and the server sequence
//! used by the store's staleness gate.

use serde::{Deserialize, Serialize};
use types::depth::{PushBrokers, PushDepth};
use types::ids::Symbol;
use types::quote::PushQuote;
use types::topic::Topic;
use types::trade::PushTrade;

/// A decoded push, one variant per subscribable topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum PushEvent {
    Quote(PushQuote),
    Depth(PushDepth),
    Brokers(PushBrokers),
    Trade(PushTrade),
}

impl PushEvent {
    pub fn symbol(&self) -> &Symbol {
        match self {
            PushEvent::Quote(e) => &e.symbol,
            PushEvent::Depth(e) => &e.symbol,
            PushEvent::Brokers(e) => &e.symbol,
            PushEvent::Trade(e) => &e.symbol,
        }
    }

    pub fn sequence(&self) -> i64 {
        match self {
            PushEvent::Quote(e) => e.sequence,
            PushEvent::Depth(e) => e.sequence,
            PushEvent::Brokers(e) => e.sequence,
            PushEvent::Trade(e) => e.sequence,
        }
    }

    pub fn topic(&self) -> Topic {
        match self {
            PushEvent::Quote(_) => Topic::Quote,
            PushEvent::Depth(_) => Topic::Depth,
            PushEvent::Brokers(_) => Topic::Brokers,
            PushEvent::Trade(_) => Topic::Trade,
        }
    }

    /// Short label for logging.
    pub fn event_type_label(&self) -> &'static str {
        match self {
            PushEvent::Quote(_) => "PushQuote",
            PushEvent::Depth(_) => "PushDepth",
            PushEvent::Brokers(_) => "PushBrokers",
            PushEvent::Trade(_) => "PushTrade",
        }
    }
}

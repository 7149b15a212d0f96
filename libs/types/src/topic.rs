//! Subscription topics
//!
//! A topic is a category of pushed data a symbol can be subscribed to.
//! On the wire each topic travels as a small integer code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::errors::DecodeError;

/// Category of server-pushed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Quote,
    Depth,
    Brokers,
    Trade,
}

/// Ordered, duplicate-free set of topics recorded for one symbol.
pub type TopicSet = BTreeSet<Topic>;

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Quote, Topic::Depth, Topic::Brokers, Topic::Trade];

    /// Wire code for this topic.
    pub fn code(self) -> i32 {
        match self {
            Topic::Quote => 1,
            Topic::Depth => 2,
            Topic::Brokers => 3,
            Topic::Trade => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Topic::Quote => "quote",
            Topic::Depth => "depth",
            Topic::Brokers => "brokers",
            Topic::Trade => "trade",
        }
    }
}

impl TryFrom<i32> for Topic {
    type Error = DecodeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Topic::Quote),
            2 => Ok(Topic::Depth),
            3 => Ok(Topic::Brokers),
            4 => Ok(Topic::Trade),
            other => Err(DecodeError::InvalidTopic(other)),
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

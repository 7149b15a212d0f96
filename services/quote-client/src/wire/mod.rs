//! Wire codec
//!
//! Request and reply bodies are JSON with camelCase keys. Decimal fields
//! travel as strings (empty = unset); enums travel as integer codes.
//! DTOs here mirror the wire exactly and are converted into `types`
//! domain values at the edge.

pub mod push;
pub mod query;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;
use types::errors::{DecodeError, QuoteError};
use types::ids::Symbol;
use types::topic::Topic;

pub use push::decode_push;

/// Serialize a request body.
pub fn encode<T: Serialize>(context: &str, body: &T) -> Result<Vec<u8>, QuoteError> {
    serde_json::to_vec(body).map_err(|e| {
        QuoteError::Decode(DecodeError::Malformed {
            context: context.to_string(),
            reason: e.to_string(),
        })
    })
}

/// Deserialize a reply or push body.
pub fn decode<T: DeserializeOwned>(context: &str, body: &[u8]) -> Result<T, DecodeError> {
    serde_json::from_slice(body).map_err(|e| DecodeError::Malformed {
        context: context.to_string(),
        reason: e.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub symbols: Vec<String>,
    pub topics: Vec<i32>,
    pub is_first_push: bool,
}

impl SubscribeRequest {
    pub fn new(symbols: &[Symbol], topics: &[Topic], is_first_push: bool) -> Self {
        Self {
            symbols: symbols.iter().map(|s| s.as_str().to_string()).collect(),
            topics: topics.iter().map(|t| t.code()).collect(),
            is_first_push,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeRequest {
    pub symbols: Vec<String>,
    #[serde(default)]
    pub topics: Vec<i32>,
    pub unsubscribe_all: bool,
}

impl UnsubscribeRequest {
    pub fn new(symbols: &[Symbol], topics: &[Topic], unsubscribe_all: bool) -> Self {
        Self {
            symbols: symbols.iter().map(|s| s.as_str().to_string()).collect(),
            topics: topics.iter().map(|t| t.code()).collect(),
            unsubscribe_all,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionItem {
    pub symbol: String,
    #[serde(default)]
    pub topics: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionItem>,
}

impl SubscriptionResponse {
    /// Convert to a symbol → topics map. Unknown topic codes are skipped.
    pub fn into_map(self) -> BTreeMap<Symbol, Vec<Topic>> {
        let mut map = BTreeMap::new();
        for item in self.subscriptions {
            let mut topics = Vec::with_capacity(item.topics.len());
            for code in item.topics {
                match Topic::try_from(code) {
                    Ok(topic) => topics.push(topic),
                    Err(_) => warn!(symbol = %item.symbol, code, "Skipping unknown topic code"),
                }
            }
            map.insert(Symbol::new(item.symbol), topics);
        }
        map
    }
}

//! Identifier types for quoted instruments
//!
//! A `Symbol` is an exchange-qualified instrument code such as `700.HK`
//! or `AAPL.US`. The client treats it as opaque apart from the optional
//! `.MARKET` suffix.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Exchange-qualified instrument identifier (e.g. "700.HK").
///
/// Ordered so that subscription maps iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from any string-like value.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Try to create a symbol, returning None for empty or whitespace-only input
    pub fn try_new(symbol: impl Into<String>) -> Option<Self> {
        let s = symbol.into();
        if s.trim().is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Get the symbol string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Market suffix after the last '.', if any (`"700.HK"` → `Some("HK")`).
    pub fn market(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, market)| market)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

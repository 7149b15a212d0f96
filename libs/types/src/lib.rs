//! Types library for the streaming quote client
//!
//! This library provides the domain types shared by the quote client:
//! pushed events, merged snapshots, pull-query results and the error taxonomy.
//!
//! # Version
//! v1.0.0
//!
//! # Modules
//! - `ids`: Instrument identifiers (Symbol)
//! - `topic`: Subscription topics (Topic, TopicSet)
//! - `numeric`: Decimal-as-string parsing helpers
//! - `quote`: Quote pushes and merged quote snapshots
//! - `depth`: Depth and broker-queue rows
//! - `trade`: Trade tape types
//! - `reference`: Static info, participants, intraday, candlesticks
//! - `derivative`: Option and warrant quotes, option chains, issuers
//! - `calendar`: Markets, trading sessions and trading days
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod topic;
pub mod numeric;
pub mod quote;
pub mod depth;
pub mod trade;
pub mod reference;
pub mod derivative;
pub mod calendar;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::topic::*;
    pub use crate::numeric::*;
    pub use crate::quote::*;
    pub use crate::depth::*;
    pub use crate::trade::*;
    pub use crate::reference::*;
    pub use crate::derivative::*;
    pub use crate::calendar::*;
    pub use crate::errors::*;
}

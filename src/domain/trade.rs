//! Immutable trade records appended to per-token and global history.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::address::AccountAddress;

/// Direction of a trade relative to the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    /// Native coin in, token out.
    Buy,
    /// Token in, native coin out.
    Sell,
}

impl TradeKind {
    /// Returns the lowercase wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One executed trade, recorded after both legs have settled.
///
/// Records are append-only: once written to a history list they are
/// never mutated or removed. For a buy the pool is the seller; for a
/// sell the pool is the buyer. USD figures are estimates from the
/// constant oracle placeholder and carry no accuracy guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Token that was traded.
    pub token_address: AccountAddress,
    /// Trade direction.
    pub kind: TradeKind,
    /// Native-coin leg of the trade.
    pub native_amount: u64,
    /// Token leg of the trade, in base units.
    pub token_amount: u64,
    /// Receiving side of the token leg.
    pub buyer: AccountAddress,
    /// Paying side of the token leg.
    pub seller: AccountAddress,
    /// Estimated USD value of the input leg, in cents.
    pub estimated_usd_in_cents: u128,
    /// Estimated USD value of the output leg, in cents.
    pub estimated_usd_out_cents: u128,
    /// Execution timestamp.
    pub timestamp: DateTime<Utc>,
}

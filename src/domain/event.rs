//! Domain events reflecting platform state mutations.
//!
//! Every committed mutation emits a [`MarketEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers
//! and optionally persisted to the PostgreSQL event log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::address::AccountAddress;
use crate::domain::trade::TradeKind;

/// Domain event emitted after every committed mutation.
///
/// Amounts are string-encoded so JSON consumers never lose precision on
/// 64/128-bit integers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum MarketEvent {
    /// Emitted when a token is issued and its pool seeded.
    TokenLaunched {
        /// Token address.
        token_address: AccountAddress,
        /// Pool account address.
        pool_address: AccountAddress,
        /// Issuing account.
        creator: AccountAddress,
        /// Display name.
        name: String,
        /// Ticker symbol.
        symbol: String,
        /// Total supply in base units (string-encoded u64).
        supply: String,
        /// Initial spot price (string-encoded u128).
        initial_price: String,
        /// Issuance timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a settled buy or sell.
    TradeExecuted {
        /// Token address.
        token_address: AccountAddress,
        /// Trade record identifier.
        trade_id: Uuid,
        /// Trade direction.
        kind: TradeKind,
        /// The non-pool side of the trade.
        trader: AccountAddress,
        /// Native leg (string-encoded u64).
        native_amount: String,
        /// Token leg in base units (string-encoded u64).
        token_amount: String,
        /// Spot price after the trade (string-encoded u128).
        new_price: String,
        /// Token reserve after the trade (string-encoded u64).
        token_reserve: String,
        /// Native reserve after the trade (string-encoded u64).
        native_reserve: String,
        /// Settlement timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after an admin metadata update.
    MetadataUpdated {
        /// Token address.
        token_address: AccountAddress,
        /// New icon URL.
        icon_uri: String,
        /// New project URL.
        project_url: String,
        /// Update timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after an admin fee change. Platform-wide: not tied to a
    /// single token.
    FeeUpdated {
        /// New issuance fee in native units (string-encoded u64).
        new_fee: String,
        /// Update timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl MarketEvent {
    /// Returns the token address this event concerns, or `None` for
    /// platform-wide events.
    #[must_use]
    pub const fn token_address(&self) -> Option<AccountAddress> {
        match self {
            Self::TokenLaunched { token_address, .. }
            | Self::TradeExecuted { token_address, .. }
            | Self::MetadataUpdated { token_address, .. } => Some(*token_address),
            Self::FeeUpdated { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::TokenLaunched { .. } => "token_launched",
            Self::TradeExecuted { .. } => "trade_executed",
            Self::MetadataUpdated { .. } => "metadata_updated",
            Self::FeeUpdated { .. } => "fee_updated",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn token_launched_event_type() {
        let creator = AccountAddress::derive_account("event-creator");
        let token = AccountAddress::derive_token(&creator, "Event Test");
        let event = MarketEvent::TokenLaunched {
            token_address: token,
            pool_address: AccountAddress::derive_pool(&token),
            creator,
            name: "Event Test".to_string(),
            symbol: "EVT".to_string(),
            supply: "1000000000000000".to_string(),
            initial_price: "10".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(event.event_type_str(), "token_launched");
        assert_eq!(event.token_address(), Some(token));
    }

    #[test]
    fn trade_executed_serializes() {
        let creator = AccountAddress::derive_account("event-creator");
        let token = AccountAddress::derive_token(&creator, "Event Test");
        let event = MarketEvent::TradeExecuted {
            token_address: token,
            trade_id: Uuid::new_v4(),
            kind: TradeKind::Buy,
            trader: AccountAddress::derive_account("event-trader"),
            native_amount: "5000000".to_string(),
            token_amount: "316032699366032".to_string(),
            new_price: "15".to_string(),
            token_reserve: "633967300633968".to_string(),
            native_reserve: "15000000".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event);
        assert!(json.is_ok());
        let json_str = json.unwrap_or_default();
        assert!(json_str.contains("trade_executed"));
        assert!(json_str.contains("316032699366032"));
    }

    #[test]
    fn fee_update_is_platform_wide() {
        let event = MarketEvent::FeeUpdated {
            new_fee: "250000".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(event.token_address(), None);
        assert_eq!(event.event_type_str(), "fee_updated");
    }
}

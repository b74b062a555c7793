//! Token records, supply arithmetic, and the scoped issuer capability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::address::AccountAddress;
use crate::error::EngineError;

/// Decimal places for every token issued on the platform.
pub const TOKEN_DECIMALS: u8 = 9;

/// Base units per whole token (`10^TOKEN_DECIMALS`).
pub const BASE_UNITS_PER_TOKEN: u64 = 1_000_000_000;

/// Largest whole-token supply whose base-unit total fits in 64 bits.
pub const MAX_WHOLE_SUPPLY: u64 = u64::MAX / BASE_UNITS_PER_TOKEN;

/// Converts a whole-token supply to base units.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] for a zero supply and
/// [`EngineError::MaxSupplyExceeded`] when the base-unit total would not
/// fit in 64 bits.
pub fn scale_supply(whole_tokens: u64) -> Result<u64, EngineError> {
    if whole_tokens == 0 {
        return Err(EngineError::InvalidAmount("supply must be positive".to_string()));
    }
    whole_tokens
        .checked_mul(BASE_UNITS_PER_TOKEN)
        .ok_or(EngineError::MaxSupplyExceeded)
}

/// Splits a base-unit supply into the creator allocation (5%, floored)
/// and the pool seed (the remainder).
///
/// The two parts always sum to the input exactly: any floor remainder is
/// folded into the pool side, never dropped.
#[must_use]
pub const fn split_initial_supply(total_base_units: u64) -> (u64, u64) {
    let creator = total_base_units / 20;
    (creator, total_base_units - creator)
}

/// Optional community links attached to a token at issuance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    /// Telegram group or channel URL.
    pub telegram: Option<String>,
    /// Twitter/X profile URL.
    pub twitter: Option<String>,
    /// Discord invite URL.
    pub discord: Option<String>,
}

/// Canonical record for one issued token.
///
/// `supply`, the addresses, and `created_at` are immutable after
/// issuance. `current_price` is denormalized from the pool after every
/// trade; `icon_uri` and `project_url` are the only admin-mutable
/// metadata fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMeta {
    /// Unique record identifier (immutable after creation).
    pub id: Uuid,

    /// Address of the account that issued the token.
    pub creator: AccountAddress,

    /// Deterministic token address derived from (creator, name).
    pub token_address: AccountAddress,

    /// Deterministic pool address derived from the token address.
    pub pool_address: AccountAddress,

    /// Display name, fixed at issuance.
    pub name: String,

    /// Ticker symbol, fixed at issuance.
    pub symbol: String,

    /// Free-form project description.
    pub description: String,

    /// Content-addressed icon URL (admin-mutable).
    pub icon_uri: String,

    /// Project website URL (admin-mutable).
    pub project_url: String,

    /// Optional community links.
    pub social_links: SocialLinks,

    /// Total supply in base units, fixed at issuance.
    pub supply: u64,

    /// Spot price in native units per whole token, updated on every trade.
    pub current_price: u128,

    /// ISO-8601 issuance timestamp.
    pub created_at: DateTime<Utc>,
}

impl TokenMeta {
    /// Applies an admin metadata update to the two mutable fields.
    pub fn update_metadata(&mut self, icon_uri: String, project_url: String) {
        self.icon_uri = icon_uri;
        self.project_url = project_url;
    }
}

/// Lightweight token summary for list endpoints, derived from the
/// canonical record on demand rather than stored separately.
#[derive(Debug, Clone, Serialize)]
pub struct TokenSummary {
    /// Token address.
    pub token_address: AccountAddress,
    /// Display name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Icon URL.
    pub icon_uri: String,
    /// Spot price in native units per whole token.
    pub current_price: u128,
    /// Total supply in base units.
    pub supply: u64,
    /// Issuance timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&TokenMeta> for TokenSummary {
    fn from(meta: &TokenMeta) -> Self {
        Self {
            token_address: meta.token_address,
            name: meta.name.clone(),
            symbol: meta.symbol.clone(),
            icon_uri: meta.icon_uri.clone(),
            current_price: meta.current_price,
            supply: meta.supply,
            created_at: meta.created_at,
        }
    }
}

/// Mint authority scoped to exactly one token, alive only for the span
/// of issuance.
///
/// The capability carries the unminted remainder of the fixed max
/// supply. Issuance mints the creator allocation and the pool seed, then
/// drops the capability, so no path to mint additional supply exists
/// after the token is registered. It is never cloned or transferred.
#[derive(Debug)]
pub struct IssuerCapability {
    token_address: AccountAddress,
    remaining: u64,
}

impl IssuerCapability {
    /// Creates the mint authority for a freshly derived token address
    /// with the given max supply in base units.
    #[must_use]
    pub const fn create(token_address: AccountAddress, max_supply_base_units: u64) -> Self {
        Self {
            token_address,
            remaining: max_supply_base_units,
        }
    }

    /// Returns the token address this capability is scoped to.
    #[must_use]
    pub const fn token_address(&self) -> AccountAddress {
        self.token_address
    }

    /// Returns the unminted remainder of the max supply.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Mints `amount` base units against the unminted remainder.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MaxSupplyExceeded`] when the mint would
    /// push the total past the fixed max supply.
    pub fn mint(&mut self, amount: u64) -> Result<u64, EngineError> {
        self.remaining = self
            .remaining
            .checked_sub(amount)
            .ok_or(EngineError::MaxSupplyExceeded)?;
        Ok(amount)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn scale_supply_matches_decimals() {
        let Ok(base) = scale_supply(1_000_000) else {
            panic!("scaling failed");
        };
        assert_eq!(base, 1_000_000_000_000_000);
    }

    #[test]
    fn scale_supply_rejects_zero() {
        assert!(matches!(scale_supply(0), Err(EngineError::InvalidAmount(_))));
    }

    #[test]
    fn scale_supply_rejects_overflow() {
        assert!(matches!(
            scale_supply(MAX_WHOLE_SUPPLY + 1),
            Err(EngineError::MaxSupplyExceeded)
        ));
    }

    #[test]
    fn split_is_exact_for_reference_supply() {
        let (creator, pool) = split_initial_supply(1_000_000_000_000_000);
        assert_eq!(creator, 50_000_000_000_000);
        assert_eq!(pool, 950_000_000_000_000);
    }

    #[test]
    fn split_is_exact_regardless_of_divisibility() {
        for total in [1_u64, 19, 20, 21, 39, 1_000_000_000_000_007] {
            let (creator, pool) = split_initial_supply(total);
            assert_eq!(creator + pool, total);
            assert_eq!(creator, total / 20);
        }
    }

    #[test]
    fn issuer_capability_enforces_max_supply() {
        let token = AccountAddress::derive_account("cap-test");
        let mut cap = IssuerCapability::create(token, 100);
        let Ok(minted) = cap.mint(40) else {
            panic!("mint failed");
        };
        assert_eq!(minted, 40);
        assert_eq!(cap.remaining(), 60);
        assert!(matches!(cap.mint(61), Err(EngineError::MaxSupplyExceeded)));
        assert_eq!(cap.remaining(), 60);
    }
}

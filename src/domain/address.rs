//! Type-safe 32-byte account addresses with deterministic derivation.
//!
//! [`AccountAddress`] identifies every participant on the platform: user
//! accounts, token asset classes, and the pool controller accounts that
//! hold reserves. Token and pool addresses are derived with SHA-256
//! from their parents rather than generated at random, so any caller
//! can locate a token's pool without an index lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::EngineError;

/// Domain separator for token addresses derived from (creator, name).
const TOKEN_DOMAIN: &[u8] = b"launchpool::token";

/// Domain separator for pool addresses derived from a token address.
const POOL_DOMAIN: &[u8] = b"launchpool::pool";

/// Domain separator for labelled accounts (dev admin, test fixtures).
const ACCOUNT_DOMAIN: &[u8] = b"launchpool::account";

/// A 32-byte platform address, hex-encoded on every external surface.
///
/// Addresses are plain map keys: derivation is a pure key-derivation
/// function with no chain-specific semantics attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    /// Creates an address from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw address bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derives the deterministic token address for `(creator, name)`.
    ///
    /// The creator's fixed-width bytes precede the name, so distinct
    /// `(creator, name)` pairs can never collide by concatenation.
    #[must_use]
    pub fn derive_token(creator: &AccountAddress, name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(TOKEN_DOMAIN);
        hasher.update(creator.0);
        hasher.update(name.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Derives the deterministic pool address for a token address.
    #[must_use]
    pub fn derive_pool(token: &AccountAddress) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(POOL_DOMAIN);
        hasher.update(token.0);
        Self(hasher.finalize().into())
    }

    /// Derives a deterministic labelled account address.
    ///
    /// Used for the development admin default and for reproducible test
    /// fixtures; real deployments configure explicit addresses.
    #[must_use]
    pub fn derive_account(label: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(ACCOUNT_DOMAIN);
        hasher.update(label.as_bytes());
        Self(hasher.finalize().into())
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for AccountAddress {
    type Err = EngineError;

    /// Parses a 64-character hex address, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|_| EngineError::InvalidRequest(format!("invalid address: {s}")))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| EngineError::InvalidRequest(format!("invalid address length: {s}")))?;
        Ok(Self(bytes))
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let creator = AccountAddress::derive_account("alice");
        let a = AccountAddress::derive_token(&creator, "Moon Token");
        let b = AccountAddress::derive_token(&creator, "Moon Token");
        assert_eq!(a, b);
    }

    #[test]
    fn different_names_derive_different_addresses() {
        let creator = AccountAddress::derive_account("alice");
        let a = AccountAddress::derive_token(&creator, "Moon Token");
        let b = AccountAddress::derive_token(&creator, "Moon Token 2");
        assert_ne!(a, b);
    }

    #[test]
    fn different_creators_derive_different_addresses() {
        let a = AccountAddress::derive_token(&AccountAddress::derive_account("alice"), "Moon");
        let b = AccountAddress::derive_token(&AccountAddress::derive_account("bob"), "Moon");
        assert_ne!(a, b);
    }

    #[test]
    fn pool_address_differs_from_token_address() {
        let creator = AccountAddress::derive_account("alice");
        let token = AccountAddress::derive_token(&creator, "Moon Token");
        let pool = AccountAddress::derive_pool(&token);
        assert_ne!(token, pool);
    }

    #[test]
    fn display_parse_round_trip() {
        let addr = AccountAddress::derive_account("carol");
        let s = addr.to_string();
        assert_eq!(s.len(), 64);
        let Ok(parsed) = s.parse::<AccountAddress>() else {
            panic!("parse failed");
        };
        assert_eq!(addr, parsed);
    }

    #[test]
    fn parse_accepts_0x_prefix() {
        let addr = AccountAddress::derive_account("carol");
        let prefixed = format!("0x{addr}");
        let Ok(parsed) = prefixed.parse::<AccountAddress>() else {
            panic!("parse failed");
        };
        assert_eq!(addr, parsed);
    }

    #[test]
    fn parse_rejects_bad_length() {
        let result: Result<AccountAddress, _> = "abcd".parse();
        assert!(result.is_err());
    }

    #[test]
    fn serde_round_trip() {
        let addr = AccountAddress::derive_account("dave");
        let Ok(json) = serde_json::to_string(&addr) else {
            panic!("serialization failed");
        };
        let Ok(deserialized) = serde_json::from_str::<AccountAddress>(&json) else {
            panic!("deserialization failed");
        };
        assert_eq!(addr, deserialized);
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let addr = AccountAddress::derive_account("erin");
        let mut map = HashMap::new();
        map.insert(addr, "test");
        assert_eq!(map.get(&addr), Some(&"test"));
    }
}

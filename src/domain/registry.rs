//! Concurrent token storage with per-token fine-grained locking.
//!
//! [`TokenRegistry`] stores one [`TokenEntry`] per issued token in a
//! `HashMap` where each entry is individually protected by a
//! [`tokio::sync::RwLock`]. This allows concurrent reads on the same
//! token and concurrent trades on different tokens, while trades on one
//! token serialize on its entry lock.
//!
//! The registry is the single canonical store: list views are derived
//! from the map on demand, so a metadata update can never leave a
//! listing copy out of sync with the canonical record.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::address::AccountAddress;
use crate::domain::token::TokenSummary;
use crate::domain::token_entry::TokenEntry;
use crate::error::EngineError;

#[derive(Debug, Default)]
struct RegistryInner {
    tokens: HashMap<AccountAddress, Arc<RwLock<TokenEntry>>>,
    /// Pool account address to token address, for lookups by pool.
    pools: HashMap<AccountAddress, AccountAddress>,
    /// Token addresses in issuance order, for stable listings.
    order: Vec<AccountAddress>,
}

/// Central append-only store for all issued tokens.
///
/// # Concurrency
///
/// - Multiple tasks may read the same token concurrently.
/// - Trades on different tokens run concurrently.
/// - Trades on the same token are serialized by its entry lock.
///
/// Tokens are never removed: the address list only grows, in issuance
/// order.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    inner: RwLock<RegistryInner>,
}

impl TokenRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a freshly issued token entry.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRequest`] if a token with the same
    /// address already exists. Addresses are derived from
    /// (creator, name), so this rejects a creator relaunching the same
    /// name.
    pub async fn insert(&self, entry: TokenEntry) -> Result<AccountAddress, EngineError> {
        let token_address = entry.meta.token_address;
        let pool_address = entry.meta.pool_address;
        let mut inner = self.inner.write().await;
        if inner.tokens.contains_key(&token_address) {
            return Err(EngineError::InvalidRequest(format!(
                "token {token_address} already exists"
            )));
        }
        inner
            .tokens
            .insert(token_address, Arc::new(RwLock::new(entry)));
        inner.pools.insert(pool_address, token_address);
        inner.order.push(token_address);
        Ok(token_address)
    }

    /// Returns a shared reference to the token entry behind its lock.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TokenNotFound`] if no token with the given
    /// address exists.
    pub async fn get(
        &self,
        token_address: AccountAddress,
    ) -> Result<Arc<RwLock<TokenEntry>>, EngineError> {
        let inner = self.inner.read().await;
        inner
            .tokens
            .get(&token_address)
            .cloned()
            .ok_or(EngineError::TokenNotFound(token_address))
    }

    /// Returns the token entry owning the pool at `pool_address`.
    ///
    /// Pool addresses are derived from token addresses, so callers that
    /// computed a pool address can reach its state without knowing the
    /// token address.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PoolNotFound`] if no pool with the given
    /// address exists.
    pub async fn get_by_pool(
        &self,
        pool_address: AccountAddress,
    ) -> Result<Arc<RwLock<TokenEntry>>, EngineError> {
        let inner = self.inner.read().await;
        let token_address = inner
            .pools
            .get(&pool_address)
            .ok_or(EngineError::PoolNotFound(pool_address))?;
        inner
            .tokens
            .get(token_address)
            .cloned()
            .ok_or(EngineError::PoolNotFound(pool_address))
    }

    /// Returns whether a token with the given address exists.
    pub async fn contains(&self, token_address: AccountAddress) -> bool {
        self.inner.read().await.tokens.contains_key(&token_address)
    }

    /// Returns summaries of all tokens in issuance order, derived from
    /// the canonical records at call time.
    pub async fn list(&self) -> Vec<TokenSummary> {
        let inner = self.inner.read().await;
        let mut summaries = Vec::with_capacity(inner.order.len());
        for address in &inner.order {
            if let Some(entry_lock) = inner.tokens.get(address) {
                let entry = entry_lock.read().await;
                summaries.push(TokenSummary::from(&entry.meta));
            }
        }
        summaries
    }

    /// Returns the number of issued tokens.
    pub async fn len(&self) -> usize {
        self.inner.read().await.tokens.len()
    }

    /// Returns `true` if no token has been issued yet.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.tokens.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::pool::LiquidityPool;
    use crate::domain::token::{SocialLinks, TokenMeta, split_initial_supply};

    fn make_entry(name: &str) -> TokenEntry {
        let creator = AccountAddress::derive_account("registry-creator");
        let token_address = AccountAddress::derive_token(&creator, name);
        let supply = 1_000_000_000_000_000;
        let (creator_allocation, pool_allocation) = split_initial_supply(supply);
        let Ok((pool, controller)) =
            LiquidityPool::seed(token_address, pool_allocation, 10_000_000)
        else {
            panic!("seeding failed");
        };
        let meta = TokenMeta {
            id: Uuid::new_v4(),
            creator,
            token_address,
            pool_address: pool.address(),
            name: name.to_string(),
            symbol: "REG".to_string(),
            description: String::new(),
            icon_uri: String::new(),
            project_url: String::new(),
            social_links: SocialLinks::default(),
            supply,
            current_price: pool.spot_price(),
            created_at: Utc::now(),
        };
        TokenEntry::new(meta, pool, controller, creator_allocation)
    }

    #[tokio::test]
    async fn insert_and_get() {
        let registry = TokenRegistry::new();
        let entry = make_entry("First");
        let address = entry.meta.token_address;

        let result = registry.insert(entry).await;
        assert!(result.is_ok());

        let fetched = registry.get(address).await;
        assert!(fetched.is_ok());
        assert!(registry.contains(address).await);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let registry = TokenRegistry::new();
        let Ok(_) = registry.insert(make_entry("Twice")).await else {
            panic!("first insert failed");
        };
        assert!(matches!(
            registry.insert(make_entry("Twice")).await,
            Err(EngineError::InvalidRequest(_))
        ));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn get_nonexistent_returns_error() {
        let registry = TokenRegistry::new();
        let ghost = AccountAddress::derive_account("registry-ghost");
        assert!(matches!(
            registry.get(ghost).await,
            Err(EngineError::TokenNotFound(_))
        ));
    }

    #[tokio::test]
    async fn lookup_by_pool_address() {
        let registry = TokenRegistry::new();
        let entry = make_entry("Pooled");
        let token_address = entry.meta.token_address;
        let pool_address = entry.meta.pool_address;
        let Ok(_) = registry.insert(entry).await else {
            panic!("insert failed");
        };

        let Ok(entry_lock) = registry.get_by_pool(pool_address).await else {
            panic!("pool lookup failed");
        };
        assert_eq!(entry_lock.read().await.meta.token_address, token_address);

        assert!(matches!(
            registry.get_by_pool(token_address).await,
            Err(EngineError::PoolNotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_preserves_issuance_order() {
        let registry = TokenRegistry::new();
        let names = ["Alpha", "Beta", "Gamma"];
        for name in names {
            let Ok(_) = registry.insert(make_entry(name)).await else {
                panic!("insert failed");
            };
        }
        let list = registry.list().await;
        let listed: Vec<String> = list.into_iter().map(|summary| summary.name).collect();
        assert_eq!(listed, ["Alpha", "Beta", "Gamma"]);
    }

    #[tokio::test]
    async fn len_and_is_empty() {
        let registry = TokenRegistry::new();
        assert!(registry.is_empty().await);
        assert_eq!(registry.len().await, 0);

        let Ok(_) = registry.insert(make_entry("Only")).await else {
            panic!("insert failed");
        };
        assert!(!registry.is_empty().await);
        assert_eq!(registry.len().await, 1);
    }
}

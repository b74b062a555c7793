//! Query service: the read-only surface over platform state.
//!
//! Nothing here mutates state or charges a fee. Quotes run the same
//! pool pricing the exchange uses, so a quote immediately followed by a
//! trade of the same amount settles at exactly the quoted figure.

use std::sync::Arc;

use crate::domain::token_entry::TokenEntry;
use crate::domain::{AccountAddress, PlatformState, TokenMeta, TokenSummary, TradeRecord};
use crate::error::EngineError;

/// Point-in-time view of one pool's reserves and price.
#[derive(Debug, Clone, Copy)]
pub struct PoolSnapshot {
    /// Token traded by the pool.
    pub token_address: AccountAddress,
    /// Pool account address.
    pub pool_address: AccountAddress,
    /// Token-side reserve in base units.
    pub token_reserve: u64,
    /// Native-coin reserve.
    pub native_reserve: u64,
    /// Spot price in native units per whole token.
    pub spot_price: u128,
}

impl PoolSnapshot {
    fn from_entry(entry: &TokenEntry) -> Self {
        Self {
            token_address: entry.meta.token_address,
            pool_address: entry.pool.address(),
            token_reserve: entry.pool.token_reserve(),
            native_reserve: entry.pool.native_reserve(),
            spot_price: entry.pool.spot_price(),
        }
    }
}

/// Canonical record plus live pool state, read under one lock.
#[derive(Debug, Clone)]
pub struct TokenDetail {
    /// Canonical token record.
    pub meta: TokenMeta,
    /// Pool snapshot taken in the same read.
    pub pool: PoolSnapshot,
    /// Distinct accounts holding a non-zero balance.
    pub holders: usize,
    /// Trades settled against this token.
    pub trade_count: usize,
}

/// Read-only accessor over [`PlatformState`].
#[derive(Debug, Clone)]
pub struct QueryService {
    platform: Arc<PlatformState>,
}

impl QueryService {
    /// Creates a new `QueryService`.
    #[must_use]
    pub fn new(platform: Arc<PlatformState>) -> Self {
        Self { platform }
    }

    /// Returns the pool snapshot for a token.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TokenNotFound`] for an unknown token.
    pub async fn pool_info(
        &self,
        token_address: AccountAddress,
    ) -> Result<PoolSnapshot, EngineError> {
        let entry_lock = self.platform.registry.get(token_address).await?;
        let entry = entry_lock.read().await;
        Ok(PoolSnapshot::from_entry(&entry))
    }

    /// Returns the pool snapshot for a pool account address, for callers
    /// that derived the pool address directly.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PoolNotFound`] for an unknown pool.
    pub async fn pool_info_by_address(
        &self,
        pool_address: AccountAddress,
    ) -> Result<PoolSnapshot, EngineError> {
        let entry_lock = self.platform.registry.get_by_pool(pool_address).await?;
        let entry = entry_lock.read().await;
        Ok(PoolSnapshot::from_entry(&entry))
    }

    /// Quotes the token output a buy of `native_amount` would settle at
    /// against current reserves, without mutating anything.
    ///
    /// # Errors
    ///
    /// Same taxonomy as executing the buy, minus balance checks.
    pub async fn quote_buy(
        &self,
        token_address: AccountAddress,
        native_amount: u64,
    ) -> Result<u64, EngineError> {
        let entry_lock = self.platform.registry.get(token_address).await?;
        let entry = entry_lock.read().await;
        entry.pool.quote_native_to_token(native_amount)
    }

    /// Quotes the native output a sell of `token_amount` would settle at
    /// against current reserves, without mutating anything.
    ///
    /// # Errors
    ///
    /// Same taxonomy as executing the sell, minus balance checks.
    pub async fn quote_sell(
        &self,
        token_address: AccountAddress,
        token_amount: u64,
    ) -> Result<u64, EngineError> {
        let entry_lock = self.platform.registry.get(token_address).await?;
        let entry = entry_lock.read().await;
        entry.pool.quote_token_to_native(token_amount)
    }

    /// Returns the canonical record for a token.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TokenNotFound`] for an unknown token.
    pub async fn get_token(
        &self,
        token_address: AccountAddress,
    ) -> Result<TokenMeta, EngineError> {
        let entry_lock = self.platform.registry.get(token_address).await?;
        let entry = entry_lock.read().await;
        Ok(entry.meta.clone())
    }

    /// Returns summaries of all tokens in issuance order.
    pub async fn list_tokens(&self) -> Vec<TokenSummary> {
        self.platform.registry.list().await
    }

    /// Returns a token's trade history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TokenNotFound`] for an unknown token.
    pub async fn token_history(
        &self,
        token_address: AccountAddress,
    ) -> Result<Vec<TradeRecord>, EngineError> {
        let entry_lock = self.platform.registry.get(token_address).await?;
        let entry = entry_lock.read().await;
        Ok(entry.history.clone())
    }

    /// Returns the global trade history across all tokens, oldest first.
    pub async fn global_history(&self) -> Vec<TradeRecord> {
        self.platform.global_history().await
    }

    /// Returns an account's native-coin balance.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AccountNotRegistered`] for unknown
    /// accounts.
    pub async fn native_balance(&self, account: AccountAddress) -> Result<u64, EngineError> {
        self.platform.ledger.balance(account).await
    }

    /// Returns an account's balance of one token, in base units.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TokenNotFound`] for an unknown token.
    /// Accounts that never traded the token report zero.
    pub async fn token_balance(
        &self,
        token_address: AccountAddress,
        account: AccountAddress,
    ) -> Result<u64, EngineError> {
        let entry_lock = self.platform.registry.get(token_address).await?;
        let entry = entry_lock.read().await;
        Ok(entry.token_balance(account))
    }

    /// Returns the canonical record together with its pool snapshot and
    /// holder count, read consistently under one lock acquisition.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TokenNotFound`] for an unknown token.
    pub async fn token_detail(
        &self,
        token_address: AccountAddress,
    ) -> Result<TokenDetail, EngineError> {
        let entry_lock = self.platform.registry.get(token_address).await?;
        let entry = entry_lock.read().await;
        Ok(TokenDetail {
            meta: entry.meta.clone(),
            pool: PoolSnapshot::from_entry(&entry),
            holders: entry.holder_count(),
            trade_count: entry.history.len(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::pool::LiquidityPool;
    use crate::domain::token::{SocialLinks, split_initial_supply};

    async fn platform_with_token() -> (QueryService, AccountAddress, AccountAddress) {
        let admin = AccountAddress::derive_account("query-admin");
        let platform = Arc::new(PlatformState::new(admin, 100_000));
        let creator = AccountAddress::derive_account("query-creator");
        let token_address = AccountAddress::derive_token(&creator, "Query Test");
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
            name: "Query Test".to_string(),
            symbol: "QRY".to_string(),
            description: String::new(),
            icon_uri: String::new(),
            project_url: String::new(),
            social_links: SocialLinks::default(),
            supply,
            current_price: pool.spot_price(),
            created_at: Utc::now(),
        };
        let entry = TokenEntry::new(meta, pool, controller, creator_allocation);
        let Ok(_) = platform.registry.insert(entry).await else {
            panic!("insert failed");
        };
        (QueryService::new(platform), token_address, creator)
    }

    #[tokio::test]
    async fn pool_info_reflects_reserves() {
        let (service, token_address, _) = platform_with_token().await;
        let Ok(info) = service.pool_info(token_address).await else {
            panic!("pool info failed");
        };
        assert_eq!(info.token_reserve, 950_000_000_000_000);
        assert_eq!(info.native_reserve, 10_000_000);
        assert_eq!(info.spot_price, 10);
        assert_eq!(info.pool_address, AccountAddress::derive_pool(&token_address));
    }

    #[tokio::test]
    async fn pool_info_resolves_by_pool_address() {
        let (service, token_address, _) = platform_with_token().await;
        let pool_address = AccountAddress::derive_pool(&token_address);
        let Ok(info) = service.pool_info_by_address(pool_address).await else {
            panic!("pool lookup failed");
        };
        assert_eq!(info.token_address, token_address);

        assert!(matches!(
            service.pool_info_by_address(token_address).await,
            Err(EngineError::PoolNotFound(_))
        ));
    }

    #[tokio::test]
    async fn quotes_match_reference_figures() {
        let (service, token_address, _) = platform_with_token().await;
        let Ok(tokens_out) = service.quote_buy(token_address, 5_000_000).await else {
            panic!("buy quote failed");
        };
        assert_eq!(tokens_out, 316_032_699_366_032);

        assert!(matches!(
            service.quote_buy(token_address, 0).await,
            Err(EngineError::ZeroAmount)
        ));
        assert!(matches!(
            service.quote_sell(token_address, 1).await,
            Err(EngineError::InsufficientLiquidity)
        ));
    }

    #[tokio::test]
    async fn token_lookups_and_balances() {
        let (service, token_address, creator) = platform_with_token().await;
        let Ok(meta) = service.get_token(token_address).await else {
            panic!("token lookup failed");
        };
        assert_eq!(meta.symbol, "QRY");

        let Ok(balance) = service.token_balance(token_address, creator).await else {
            panic!("balance lookup failed");
        };
        assert_eq!(balance, 50_000_000_000_000);

        let stranger = AccountAddress::derive_account("query-stranger");
        let Ok(balance) = service.token_balance(token_address, stranger).await else {
            panic!("balance lookup failed");
        };
        assert_eq!(balance, 0);

        assert_eq!(service.list_tokens().await.len(), 1);
        let Ok(history) = service.token_history(token_address).await else {
            panic!("history lookup failed");
        };
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn token_detail_is_one_consistent_read() {
        let (service, token_address, _) = platform_with_token().await;
        let Ok(detail) = service.token_detail(token_address).await else {
            panic!("detail lookup failed");
        };
        assert_eq!(detail.meta.token_address, token_address);
        assert_eq!(detail.pool.token_reserve, 950_000_000_000_000);
        assert_eq!(detail.holders, 1);
        assert_eq!(detail.trade_count, 0);
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let (service, _, _) = platform_with_token().await;
        let ghost = AccountAddress::derive_account("query-ghost");
        assert!(matches!(
            service.get_token(ghost).await,
            Err(EngineError::TokenNotFound(_))
        ));
        assert!(matches!(
            service.quote_buy(ghost, 1).await,
            Err(EngineError::TokenNotFound(_))
        ));
    }
}

//! Issuance service: token creation and ledger account onboarding.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::pool::LiquidityPool;
use crate::domain::token::{IssuerCapability, scale_supply, split_initial_supply};
use crate::domain::token_entry::TokenEntry;
use crate::domain::{AccountAddress, EventBus, MarketEvent, PlatformState, SocialLinks, TokenMeta};
use crate::error::EngineError;

/// Maximum length of a token display name.
const MAX_NAME_LEN: usize = 64;

/// Maximum length of a ticker symbol.
const MAX_SYMBOL_LEN: usize = 16;

/// Everything a caller supplies to issue a token.
#[derive(Debug, Clone)]
pub struct LaunchParams {
    /// Issuing account; pays the platform fee and the pool funding.
    pub creator: AccountAddress,
    /// Display name. Combined with the creator it fixes the token
    /// address.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Total supply in whole tokens.
    pub supply: u64,
    /// Free-form project description.
    pub description: String,
    /// Content-addressed icon URL.
    pub icon_uri: String,
    /// Project website URL.
    pub project_url: String,
    /// Optional community links.
    pub social_links: SocialLinks,
    /// Native coin moved into the pool as its initial quote-side reserve.
    pub initial_native_amount: u64,
}

/// Orchestration layer for token issuance.
///
/// Issuance is the only operation that grows the registry, and it is
/// serialized through the platform's issuance gate so the fee settlement
/// and the registry insert commit as one transaction.
#[derive(Debug, Clone)]
pub struct IssuanceService {
    platform: Arc<PlatformState>,
    event_bus: EventBus,
}

impl IssuanceService {
    /// Creates a new `IssuanceService`.
    #[must_use]
    pub fn new(platform: Arc<PlatformState>, event_bus: EventBus) -> Self {
        Self {
            platform,
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Issues a token: derives its address, mints the 5%/95% split,
    /// seeds the pool with the 95% side against the caller's native
    /// funding, charges the platform fee, and registers the entry.
    ///
    /// The issuer capability minting both allocations is dropped before
    /// this method returns, so no path to mint further supply survives
    /// issuance. No history entry is recorded for issuance itself.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ZeroAmount`] when the pool funding is
    /// zero, [`EngineError::InvalidRequest`] for a bad name or symbol or
    /// a duplicate (creator, name) launch, [`EngineError::InvalidAmount`]
    /// for a zero supply, [`EngineError::MaxSupplyExceeded`] when the
    /// scaled supply exceeds 64 bits,
    /// [`EngineError::AccountNotRegistered`] for an unknown creator, and
    /// [`EngineError::InsufficientBalance`] when the creator cannot pay
    /// fee plus funding. A failed issuance changes nothing.
    pub async fn create_token(&self, params: LaunchParams) -> Result<TokenMeta, EngineError> {
        if params.initial_native_amount == 0 {
            return Err(EngineError::ZeroAmount);
        }
        let name = params.name.trim();
        let symbol = params.symbol.trim();
        if name.is_empty() || symbol.is_empty() {
            return Err(EngineError::InvalidRequest(
                "name and symbol must not be empty".to_string(),
            ));
        }
        if name.len() > MAX_NAME_LEN || symbol.len() > MAX_SYMBOL_LEN {
            return Err(EngineError::InvalidRequest(
                "name or symbol too long".to_string(),
            ));
        }
        let supply_base = scale_supply(params.supply)?;
        if !self.platform.ledger.is_registered(params.creator).await {
            return Err(EngineError::AccountNotRegistered(params.creator));
        }

        let token_address = AccountAddress::derive_token(&params.creator, name);

        let gate = self.platform.lock_issuance().await;
        if self.platform.registry.contains(token_address).await {
            return Err(EngineError::InvalidRequest(format!(
                "token {token_address} already exists"
            )));
        }
        let fee = self.platform.fee().await;

        let mut capability = IssuerCapability::create(token_address, supply_base);
        let (creator_split, pool_split) = split_initial_supply(supply_base);
        let creator_allocation = capability.mint(creator_split)?;
        let pool_allocation = capability.mint(pool_split)?;
        let (pool, controller) =
            LiquidityPool::seed(token_address, pool_allocation, params.initial_native_amount)?;

        // Last fallible step: fee to admin plus pool funding leave the
        // creator in one critical section.
        self.platform
            .ledger
            .settle_issuance(
                params.creator,
                self.platform.admin(),
                fee,
                params.initial_native_amount,
            )
            .await?;

        let meta = TokenMeta {
            id: Uuid::new_v4(),
            creator: params.creator,
            token_address,
            pool_address: pool.address(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            description: params.description,
            icon_uri: params.icon_uri,
            project_url: params.project_url,
            social_links: params.social_links,
            supply: supply_base,
            current_price: pool.spot_price(),
            created_at: Utc::now(),
        };
        let entry = TokenEntry::new(meta.clone(), pool, controller, creator_allocation);
        self.platform.registry.insert(entry).await?;
        drop(gate);

        let _ = self.event_bus.publish(MarketEvent::TokenLaunched {
            token_address,
            pool_address: meta.pool_address,
            creator: meta.creator,
            name: meta.name.clone(),
            symbol: meta.symbol.clone(),
            supply: meta.supply.to_string(),
            initial_price: meta.current_price.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(%token_address, name = %meta.name, supply = meta.supply, "token launched");
        Ok(meta)
    }

    /// Registers a native-coin account. Idempotent; returns `true` when
    /// the account is new.
    pub async fn register_account(&self, account: AccountAddress) -> bool {
        let created = self.platform.ledger.register(account).await;
        if created {
            tracing::info!(%account, "account registered");
        }
        created
    }

    /// Credits native coin to a registered account and returns the new
    /// balance.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ZeroAmount`] for a zero amount,
    /// [`EngineError::AccountNotRegistered`] for unknown accounts, and
    /// [`EngineError::InvalidAmount`] when the balance would overflow.
    pub async fn deposit(
        &self,
        account: AccountAddress,
        amount: u64,
    ) -> Result<u64, EngineError> {
        if amount == 0 {
            return Err(EngineError::ZeroAmount);
        }
        self.platform.ledger.deposit(account, amount).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const FEE: u64 = 100_000;

    async fn funded_service() -> (IssuanceService, Arc<PlatformState>, AccountAddress) {
        let admin = AccountAddress::derive_account("issuance-admin");
        let platform = Arc::new(PlatformState::new(admin, FEE));
        platform.ledger.register(admin).await;
        let creator = AccountAddress::derive_account("issuance-creator");
        platform.ledger.register(creator).await;
        let Ok(_) = platform.ledger.deposit(creator, 10_100_000).await else {
            panic!("deposit failed");
        };
        let service = IssuanceService::new(Arc::clone(&platform), EventBus::new(1000));
        (service, platform, creator)
    }

    fn launch(creator: AccountAddress) -> LaunchParams {
        LaunchParams {
            creator,
            name: "Moon Token".to_string(),
            symbol: "MOON".to_string(),
            supply: 1_000_000,
            description: "To the moon".to_string(),
            icon_uri: "https://cdn.example/moon.png".to_string(),
            project_url: "https://moon.example".to_string(),
            social_links: SocialLinks::default(),
            initial_native_amount: 10_000_000,
        }
    }

    #[tokio::test]
    async fn create_token_seeds_pool_and_splits_supply() {
        let (service, platform, creator) = funded_service().await;

        let Ok(meta) = service.create_token(launch(creator)).await else {
            panic!("issuance failed");
        };
        assert_eq!(meta.supply, 1_000_000_000_000_000);
        assert_eq!(
            meta.token_address,
            AccountAddress::derive_token(&creator, "Moon Token")
        );
        assert_eq!(
            meta.pool_address,
            AccountAddress::derive_pool(&meta.token_address)
        );

        let Ok(entry_lock) = platform.registry.get(meta.token_address).await else {
            panic!("token not found");
        };
        let entry = entry_lock.read().await;
        assert_eq!(entry.pool.token_reserve(), 950_000_000_000_000);
        assert_eq!(entry.pool.native_reserve(), 10_000_000);
        assert_eq!(entry.token_balance(creator), 50_000_000_000_000);
        assert_eq!(entry.meta.current_price, 10);
        assert!(entry.history.is_empty());
        drop(entry);

        let Ok(creator_native) = platform.ledger.balance(creator).await else {
            panic!("balance lookup failed");
        };
        assert_eq!(creator_native, 0);
        let Ok(admin_native) = platform.ledger.balance(platform.admin()).await else {
            panic!("balance lookup failed");
        };
        assert_eq!(admin_native, FEE);
        assert_eq!(platform.global_trade_count().await, 0);
    }

    #[tokio::test]
    async fn create_token_emits_launch_event() {
        let (service, _platform, creator) = funded_service().await;
        let mut rx = service.event_bus().subscribe();

        let Ok(meta) = service.create_token(launch(creator)).await else {
            panic!("issuance failed");
        };
        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "token_launched");
        assert_eq!(event.token_address(), Some(meta.token_address));
    }

    #[tokio::test]
    async fn zero_pool_funding_is_rejected() {
        let (service, _platform, creator) = funded_service().await;
        let mut params = launch(creator);
        params.initial_native_amount = 0;
        assert!(matches!(
            service.create_token(params).await,
            Err(EngineError::ZeroAmount)
        ));
    }

    #[tokio::test]
    async fn zero_supply_is_rejected() {
        let (service, _platform, creator) = funded_service().await;
        let mut params = launch(creator);
        params.supply = 0;
        assert!(matches!(
            service.create_token(params).await,
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let (service, _platform, creator) = funded_service().await;
        let mut params = launch(creator);
        params.name = "   ".to_string();
        assert!(matches!(
            service.create_token(params).await,
            Err(EngineError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn unregistered_creator_is_rejected() {
        let (service, _platform, _) = funded_service().await;
        let ghost = AccountAddress::derive_account("issuance-ghost");
        assert!(matches!(
            service.create_token(launch(ghost)).await,
            Err(EngineError::AccountNotRegistered(_))
        ));
    }

    #[tokio::test]
    async fn underfunded_creator_leaves_no_trace() {
        let (service, platform, _) = funded_service().await;
        let poor = AccountAddress::derive_account("issuance-poor");
        platform.ledger.register(poor).await;
        let Ok(_) = platform.ledger.deposit(poor, 5_000_000).await else {
            panic!("deposit failed");
        };

        assert!(matches!(
            service.create_token(launch(poor)).await,
            Err(EngineError::InsufficientBalance(_))
        ));
        assert!(platform.registry.is_empty().await);
        let Ok(balance) = platform.ledger.balance(poor).await else {
            panic!("balance lookup failed");
        };
        assert_eq!(balance, 5_000_000);
    }

    #[tokio::test]
    async fn relaunching_the_same_name_is_rejected() {
        let (service, platform, creator) = funded_service().await;
        let Ok(_) = platform.ledger.deposit(creator, 10_100_000).await else {
            panic!("deposit failed");
        };

        let Ok(_) = service.create_token(launch(creator)).await else {
            panic!("first issuance failed");
        };
        assert!(matches!(
            service.create_token(launch(creator)).await,
            Err(EngineError::InvalidRequest(_))
        ));
        assert_eq!(platform.registry.len().await, 1);
    }

    #[tokio::test]
    async fn account_onboarding_round_trip() {
        let (service, _platform, _) = funded_service().await;
        let account = AccountAddress::derive_account("issuance-new-account");
        assert!(service.register_account(account).await);
        assert!(!service.register_account(account).await);
        let Ok(balance) = service.deposit(account, 42).await else {
            panic!("deposit failed");
        };
        assert_eq!(balance, 42);
        assert!(matches!(
            service.deposit(account, 0).await,
            Err(EngineError::ZeroAmount)
        ));
    }
}

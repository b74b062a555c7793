//! Admin service: platform fee and token metadata mutation.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{AccountAddress, EventBus, MarketEvent, PlatformState, TokenMeta};
use crate::error::EngineError;

/// Orchestration layer for the two admin-gated mutations.
///
/// Every method authenticates the caller against the platform admin
/// identity before touching any state.
#[derive(Debug, Clone)]
pub struct AdminService {
    platform: Arc<PlatformState>,
    event_bus: EventBus,
}

impl AdminService {
    /// Creates a new `AdminService`.
    #[must_use]
    pub fn new(platform: Arc<PlatformState>, event_bus: EventBus) -> Self {
        Self {
            platform,
            event_bus,
        }
    }

    /// Replaces the platform issuance fee.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotAdmin`] unless `caller` is the platform
    /// admin. A rejected call leaves the fee unchanged.
    pub async fn update_fee(
        &self,
        caller: AccountAddress,
        new_fee: u64,
    ) -> Result<u64, EngineError> {
        if !self.platform.is_admin(caller) {
            return Err(EngineError::NotAdmin);
        }
        self.platform.set_fee(new_fee).await;

        let _ = self.event_bus.publish(MarketEvent::FeeUpdated {
            new_fee: new_fee.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(new_fee, "platform fee updated");
        Ok(new_fee)
    }

    /// Replaces a token's mutable metadata fields.
    ///
    /// The canonical record is the only stored copy, so listings derived
    /// from it can never lag behind this update.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotAdmin`] unless `caller` is the platform
    /// admin and [`EngineError::TokenNotFound`] for an unknown token.
    pub async fn update_token_metadata(
        &self,
        caller: AccountAddress,
        token_address: AccountAddress,
        icon_uri: String,
        project_url: String,
    ) -> Result<TokenMeta, EngineError> {
        if !self.platform.is_admin(caller) {
            return Err(EngineError::NotAdmin);
        }
        let entry_lock = self.platform.registry.get(token_address).await?;
        let mut entry = entry_lock.write().await;
        entry.meta.update_metadata(icon_uri, project_url);
        let meta = entry.meta.clone();
        drop(entry);

        let _ = self.event_bus.publish(MarketEvent::MetadataUpdated {
            token_address,
            icon_uri: meta.icon_uri.clone(),
            project_url: meta.project_url.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(%token_address, "token metadata updated");
        Ok(meta)
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
    use crate::domain::token_entry::TokenEntry;

    async fn platform_with_token() -> (Arc<PlatformState>, AccountAddress) {
        let admin = AccountAddress::derive_account("admin-service-admin");
        let platform = Arc::new(PlatformState::new(admin, 100_000));
        let creator = AccountAddress::derive_account("admin-service-creator");
        let token_address = AccountAddress::derive_token(&creator, "Admin Test");
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
            name: "Admin Test".to_string(),
            symbol: "ADM".to_string(),
            description: String::new(),
            icon_uri: "https://cdn.example/old.png".to_string(),
            project_url: "https://old.example".to_string(),
            social_links: SocialLinks::default(),
            supply,
            current_price: pool.spot_price(),
            created_at: Utc::now(),
        };
        let entry = TokenEntry::new(meta, pool, controller, creator_allocation);
        let Ok(_) = platform.registry.insert(entry).await else {
            panic!("insert failed");
        };
        (platform, token_address)
    }

    fn make_service(platform: &Arc<PlatformState>) -> AdminService {
        AdminService::new(Arc::clone(platform), EventBus::new(1000))
    }

    #[tokio::test]
    async fn non_admin_cannot_update_fee() {
        let (platform, _) = platform_with_token().await;
        let service = make_service(&platform);
        let intruder = AccountAddress::derive_account("admin-service-intruder");

        assert!(matches!(
            service.update_fee(intruder, 1).await,
            Err(EngineError::NotAdmin)
        ));
        assert_eq!(platform.fee().await, 100_000);
    }

    #[tokio::test]
    async fn admin_updates_fee_and_emits_event() {
        let (platform, _) = platform_with_token().await;
        let service = make_service(&platform);
        let mut rx = service.event_bus.subscribe();

        let Ok(applied) = service.update_fee(platform.admin(), 250_000).await else {
            panic!("fee update failed");
        };
        assert_eq!(applied, 250_000);
        assert_eq!(platform.fee().await, 250_000);

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "fee_updated");
    }

    #[tokio::test]
    async fn metadata_update_reaches_canonical_record_and_listings() {
        let (platform, token_address) = platform_with_token().await;
        let service = make_service(&platform);

        let Ok(meta) = service
            .update_token_metadata(
                platform.admin(),
                token_address,
                "https://cdn.example/new.png".to_string(),
                "https://new.example".to_string(),
            )
            .await
        else {
            panic!("metadata update failed");
        };
        assert_eq!(meta.icon_uri, "https://cdn.example/new.png");

        let Ok(entry_lock) = platform.registry.get(token_address).await else {
            panic!("token not found");
        };
        let entry = entry_lock.read().await;
        assert_eq!(entry.meta.icon_uri, "https://cdn.example/new.png");
        assert_eq!(entry.meta.project_url, "https://new.example");
        drop(entry);

        let listings = platform.registry.list().await;
        assert_eq!(
            listings.first().map(|summary| summary.icon_uri.as_str()),
            Some("https://cdn.example/new.png")
        );
    }

    #[tokio::test]
    async fn non_admin_cannot_update_metadata() {
        let (platform, token_address) = platform_with_token().await;
        let service = make_service(&platform);
        let intruder = AccountAddress::derive_account("admin-service-intruder");

        assert!(matches!(
            service
                .update_token_metadata(
                    intruder,
                    token_address,
                    "https://cdn.example/x.png".to_string(),
                    "https://x.example".to_string(),
                )
                .await,
            Err(EngineError::NotAdmin)
        ));
    }

    #[tokio::test]
    async fn metadata_update_for_unknown_token_fails() {
        let (platform, _) = platform_with_token().await;
        let service = make_service(&platform);
        let ghost = AccountAddress::derive_account("admin-service-ghost");

        assert!(matches!(
            service
                .update_token_metadata(
                    platform.admin(),
                    ghost,
                    String::new(),
                    String::new(),
                )
                .await,
            Err(EngineError::TokenNotFound(_))
        ));
    }
}

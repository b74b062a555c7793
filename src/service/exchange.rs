//! Exchange service: buy and sell settlement against token pools.
//!
//! Both trade directions run through one shared settlement path, so the
//! named swap entry points can never drift apart in how they update
//! reserves. Each trade validates everything first, settles the ledger
//! leg as the last fallible step, then commits the entry mutation in one
//! infallible block while the token's entry lock is held.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::oracle;
use crate::domain::pool::spot_price_for;
use crate::domain::{AccountAddress, EventBus, MarketEvent, PlatformState, TradeKind, TradeRecord};
use crate::error::EngineError;

/// Orchestration layer for trade execution.
///
/// Stateless coordinator: owns a reference to [`PlatformState`] for
/// state and an [`EventBus`] for event emission. Every trade follows the
/// pattern: acquire the entry lock → validate → settle the native leg →
/// commit → emit events → return the record.
#[derive(Debug, Clone)]
pub struct ExchangeService {
    platform: Arc<PlatformState>,
    event_bus: EventBus,
}

impl ExchangeService {
    /// Creates a new `ExchangeService`.
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

    /// Buys tokens with native coin at the pool's current curve price.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ZeroAmount`] for a zero input,
    /// [`EngineError::TokenNotFound`] for an unknown token,
    /// [`EngineError::InsufficientLiquidity`] when the output would be
    /// zero, [`EngineError::AccountNotRegistered`] for an unknown trader,
    /// and [`EngineError::InsufficientBalance`] when the trader cannot
    /// pay the native leg. A failed buy changes nothing.
    pub async fn buy(
        &self,
        trader: AccountAddress,
        token_address: AccountAddress,
        native_amount: u64,
    ) -> Result<TradeRecord, EngineError> {
        self.execute_trade(trader, token_address, TradeKind::Buy, native_amount)
            .await
    }

    /// Sells tokens back to the pool for native coin.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ExchangeService::buy`];
    /// [`EngineError::InsufficientBalance`] here means the trader holds
    /// fewer tokens than offered. A failed sell changes nothing.
    pub async fn sell(
        &self,
        trader: AccountAddress,
        token_address: AccountAddress,
        token_amount: u64,
    ) -> Result<TradeRecord, EngineError> {
        self.execute_trade(trader, token_address, TradeKind::Sell, token_amount)
            .await
    }

    /// Shared settlement path for both trade directions.
    ///
    /// While the entry's write lock is held, reserves observed by the
    /// quote are exactly the reserves the commit applies to, so pricing
    /// can never come from a stale snapshot.
    async fn execute_trade(
        &self,
        trader: AccountAddress,
        token_address: AccountAddress,
        kind: TradeKind,
        input_amount: u64,
    ) -> Result<TradeRecord, EngineError> {
        if input_amount == 0 {
            return Err(EngineError::ZeroAmount);
        }
        let entry_lock = self.platform.registry.get(token_address).await?;
        let mut entry = entry_lock.write().await;

        let record = match kind {
            TradeKind::Buy => {
                let native_in = input_amount;
                let token_out = entry.pool.quote_native_to_token(native_in)?;
                let price_after = spot_price_for(
                    entry.pool.token_reserve() - token_out,
                    entry.pool.native_reserve() + native_in,
                );
                let usd_in = oracle::native_to_usd_cents(native_in)?;
                let usd_out = oracle::token_to_usd_cents(token_out, price_after)?;
                // Last fallible step: take the native leg from the trader.
                self.platform.ledger.withdraw(trader, native_in).await?;
                let record = TradeRecord {
                    id: Uuid::new_v4(),
                    token_address,
                    kind,
                    native_amount: native_in,
                    token_amount: token_out,
                    buyer: trader,
                    seller: entry.pool.address(),
                    estimated_usd_in_cents: usd_in,
                    estimated_usd_out_cents: usd_out,
                    timestamp: Utc::now(),
                };
                entry.apply_buy(trader, native_in, token_out, record.clone());
                record
            }
            TradeKind::Sell => {
                let token_in = input_amount;
                let native_out = entry.pool.quote_token_to_native(token_in)?;
                let held = entry.token_balance(trader);
                if held < token_in {
                    return Err(EngineError::InsufficientBalance(format!(
                        "need {token_in} token base units, have {held}"
                    )));
                }
                let price_after = spot_price_for(
                    entry.pool.token_reserve() + token_in,
                    entry.pool.native_reserve() - native_out,
                );
                let usd_in = oracle::token_to_usd_cents(token_in, price_after)?;
                let usd_out = oracle::native_to_usd_cents(native_out)?;
                // Last fallible step: pay the native leg out to the trader.
                self.platform.ledger.deposit(trader, native_out).await?;
                let record = TradeRecord {
                    id: Uuid::new_v4(),
                    token_address,
                    kind,
                    native_amount: native_out,
                    token_amount: token_in,
                    buyer: entry.pool.address(),
                    seller: trader,
                    estimated_usd_in_cents: usd_in,
                    estimated_usd_out_cents: usd_out,
                    timestamp: Utc::now(),
                };
                entry.apply_sell(trader, token_in, native_out, record.clone());
                record
            }
        };

        let new_price = entry.meta.current_price;
        let token_reserve = entry.pool.token_reserve();
        let native_reserve = entry.pool.native_reserve();
        drop(entry);

        self.platform.push_global_trade(record.clone()).await;

        let _ = self.event_bus.publish(MarketEvent::TradeExecuted {
            token_address,
            trade_id: record.id,
            kind,
            trader,
            native_amount: record.native_amount.to_string(),
            token_amount: record.token_amount.to_string(),
            new_price: new_price.to_string(),
            token_reserve: token_reserve.to_string(),
            native_reserve: native_reserve.to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!(%token_address, %trader, kind = kind.as_str(), "trade settled");
        Ok(record)
    }
}

//! Aggregate combining a token's canonical record, its liquidity pool,
//! the pool's controller capability, holder balances, and trade history.
//!
//! One entry is the unit of serialization for everything related to one
//! token: the registry wraps each entry in its own lock, so a trade
//! holds exactly one entry exclusively while it settles.

use std::collections::HashMap;

use crate::domain::address::AccountAddress;
use crate::domain::pool::{LiquidityPool, PoolController};
use crate::domain::token::TokenMeta;
use crate::domain::trade::TradeRecord;

/// All engine state for one issued token.
///
/// The controller capability is private: reserve movement is only
/// reachable through [`TokenEntry::apply_buy`] and
/// [`TokenEntry::apply_sell`], which commit a fully validated trade.
/// Holder balances are private so every mutation path keeps the supply
/// conservation invariant: held balances plus the pool's token reserve
/// always equal the fixed total supply.
#[derive(Debug)]
pub struct TokenEntry {
    /// Canonical token record.
    pub meta: TokenMeta,

    /// The token's liquidity pool. Reads are free; mutation requires the
    /// entry's private controller.
    pub pool: LiquidityPool,

    /// Per-token trade history, append-only, oldest first.
    pub history: Vec<TradeRecord>,

    controller: PoolController,
    balances: HashMap<AccountAddress, u64>,
}

impl TokenEntry {
    /// Creates the entry for a freshly issued token, crediting the
    /// creator allocation.
    #[must_use]
    pub fn new(
        meta: TokenMeta,
        pool: LiquidityPool,
        controller: PoolController,
        creator_allocation: u64,
    ) -> Self {
        let mut balances = HashMap::new();
        if creator_allocation > 0 {
            balances.insert(meta.creator, creator_allocation);
        }
        Self {
            meta,
            pool,
            history: Vec::new(),
            controller,
            balances,
        }
    }

    /// Returns the account's balance of this token, in base units.
    #[must_use]
    pub fn token_balance(&self, account: AccountAddress) -> u64 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Returns the number of distinct accounts holding a balance.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|amount| **amount > 0).count()
    }

    /// Commits a validated buy: moves the native input into the pool,
    /// releases `token_out` to the trader, refreshes the denormalized
    /// price, and appends the trade record.
    ///
    /// `token_out` must be the quote produced against the entry's current
    /// reserves while this entry was exclusively held, and the trader's
    /// native leg must already be settled.
    pub fn apply_buy(
        &mut self,
        trader: AccountAddress,
        native_in: u64,
        token_out: u64,
        record: TradeRecord,
    ) {
        self.controller.commit_buy(&mut self.pool, native_in, token_out);
        *self.balances.entry(trader).or_insert(0) += token_out;
        self.meta.current_price = self.pool.spot_price();
        self.history.push(record);
    }

    /// Commits a validated sell: moves `token_in` from the trader into
    /// the pool, refreshes the denormalized price, and appends the trade
    /// record.
    ///
    /// The trader's token balance must already be checked against
    /// `token_in`, and the native leg must already be settled.
    pub fn apply_sell(
        &mut self,
        trader: AccountAddress,
        token_in: u64,
        native_out: u64,
        record: TradeRecord,
    ) {
        let balance = self.balances.entry(trader).or_insert(0);
        *balance -= token_in;
        self.controller.commit_sell(&mut self.pool, token_in, native_out);
        self.meta.current_price = self.pool.spot_price();
        self.history.push(record);
    }

    /// Sum of all held balances plus the pool reserve, for invariant
    /// checks and diagnostics.
    #[must_use]
    pub fn circulating_total(&self) -> u128 {
        let held: u128 = self.balances.values().map(|amount| u128::from(*amount)).sum();
        held + u128::from(self.pool.token_reserve())
    }
}

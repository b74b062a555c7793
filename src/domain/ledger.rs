//! In-process native-coin ledger.
//!
//! Stand-in for the platform's external settlement ledger, exposing the
//! same four primitives the engine relies on: registration, balance
//! lookup, credit, and debit. Pool reserves are not ledger accounts;
//! they live inside each pool record, so the ledger only carries user
//! and admin balances.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::address::AccountAddress;
use crate::error::EngineError;

/// Thread-safe native-coin balance book keyed by account address.
///
/// Registration is append-only: accounts are never removed, so a
/// successful registration check stays valid for the rest of the
/// process lifetime.
#[derive(Debug, Default)]
pub struct NativeLedger {
    balances: RwLock<HashMap<AccountAddress, u64>>,
}

impl NativeLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account with a zero balance.
    ///
    /// Returns `true` if the account was newly registered, `false` if it
    /// already existed. Registering twice is harmless.
    pub async fn register(&self, account: AccountAddress) -> bool {
        let mut balances = self.balances.write().await;
        match balances.entry(account) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(0);
                true
            }
        }
    }

    /// Returns whether the account has been registered.
    pub async fn is_registered(&self, account: AccountAddress) -> bool {
        self.balances.read().await.contains_key(&account)
    }

    /// Returns the account's balance.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AccountNotRegistered`] for unknown accounts.
    pub async fn balance(&self, account: AccountAddress) -> Result<u64, EngineError> {
        self.balances
            .read()
            .await
            .get(&account)
            .copied()
            .ok_or(EngineError::AccountNotRegistered(account))
    }

    /// Credits `amount` native units to the account.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AccountNotRegistered`] for unknown accounts
    /// and [`EngineError::InvalidAmount`] when the balance would overflow.
    pub async fn deposit(&self, account: AccountAddress, amount: u64) -> Result<u64, EngineError> {
        let mut balances = self.balances.write().await;
        let balance = balances
            .get_mut(&account)
            .ok_or(EngineError::AccountNotRegistered(account))?;
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| EngineError::InvalidAmount("balance would overflow".to_string()))?;
        Ok(*balance)
    }

    /// Debits `amount` native units from the account.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AccountNotRegistered`] for unknown accounts
    /// and [`EngineError::InsufficientBalance`] when the balance cannot
    /// cover the debit. A failed debit changes nothing.
    pub async fn withdraw(&self, account: AccountAddress, amount: u64) -> Result<u64, EngineError> {
        let mut balances = self.balances.write().await;
        let balance = balances
            .get_mut(&account)
            .ok_or(EngineError::AccountNotRegistered(account))?;
        *balance = balance.checked_sub(amount).ok_or_else(|| {
            EngineError::InsufficientBalance(format!(
                "need {amount} native units, have {balance}"
            ))
        })?;
        Ok(*balance)
    }

    /// Settles the ledger side of an issuance in one critical section:
    /// the creator pays the platform fee to the admin and funds the new
    /// pool's native side.
    ///
    /// Both debits and the fee credit commit together or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AccountNotRegistered`] when creator or
    /// admin is unknown, [`EngineError::InvalidAmount`] when the charges
    /// or the admin balance would overflow, and
    /// [`EngineError::InsufficientBalance`] when the creator cannot cover
    /// fee plus pool funding.
    pub async fn settle_issuance(
        &self,
        creator: AccountAddress,
        admin: AccountAddress,
        fee: u64,
        pool_funding: u64,
    ) -> Result<(), EngineError> {
        let mut balances = self.balances.write().await;
        let total = fee
            .checked_add(pool_funding)
            .ok_or_else(|| EngineError::InvalidAmount("issuance charge overflows".to_string()))?;
        let creator_balance = *balances
            .get(&creator)
            .ok_or(EngineError::AccountNotRegistered(creator))?;
        let admin_balance = *balances
            .get(&admin)
            .ok_or(EngineError::AccountNotRegistered(admin))?;
        let creator_after = creator_balance.checked_sub(total).ok_or_else(|| {
            EngineError::InsufficientBalance(format!(
                "need {total} native units for fee and pool funding, have {creator_balance}"
            ))
        })?;
        let admin_after = admin_balance
            .checked_add(fee)
            .ok_or_else(|| EngineError::InvalidAmount("admin balance would overflow".to_string()))?;
        balances.insert(creator, creator_after);
        balances.insert(admin, admin_after);
        Ok(())
    }
}

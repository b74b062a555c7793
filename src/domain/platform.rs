//! Process-wide platform state, constructed once at bootstrap.
//!
//! [`PlatformState`] replaces an ambient global: it is built in `main`,
//! wrapped in an `Arc`, and injected into every service and handler.
//! It owns the token registry, the native ledger, the admin-mutable
//! platform fee, and the global trade history.

use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::domain::address::AccountAddress;
use crate::domain::ledger::NativeLedger;
use crate::domain::registry::TokenRegistry;
use crate::domain::trade::TradeRecord;

/// Root of all engine state.
///
/// The admin identity is fixed for the process lifetime; the platform
/// fee is the only admin-mutable scalar. The global history is
/// append-only and interleaves records from all tokens in settlement
/// order, while each token's own history stays strictly ordered under
/// its entry lock.
#[derive(Debug)]
pub struct PlatformState {
    /// Canonical token store.
    pub registry: TokenRegistry,

    /// Native-coin balance book.
    pub ledger: NativeLedger,

    admin: AccountAddress,
    fee: RwLock<u64>,
    global_history: RwLock<Vec<TradeRecord>>,
    issuance_gate: Mutex<()>,
}

impl PlatformState {
    /// Creates the platform state with its admin identity and the
    /// initial issuance fee in native units.
    #[must_use]
    pub fn new(admin: AccountAddress, initial_fee: u64) -> Self {
        Self {
            registry: TokenRegistry::new(),
            ledger: NativeLedger::new(),
            admin,
            fee: RwLock::new(initial_fee),
            global_history: RwLock::new(Vec::new()),
            issuance_gate: Mutex::new(()),
        }
    }

    /// Serializes token issuance: the returned guard must be held from
    /// the duplicate-address check until the new entry is registered, so
    /// the fee settlement and the registry insert commit as one
    /// transaction.
    pub async fn lock_issuance(&self) -> MutexGuard<'_, ()> {
        self.issuance_gate.lock().await
    }

    /// Returns the admin identity.
    #[must_use]
    pub const fn admin(&self) -> AccountAddress {
        self.admin
    }

    /// Returns whether `caller` is the platform admin.
    #[must_use]
    pub fn is_admin(&self, caller: AccountAddress) -> bool {
        caller == self.admin
    }

    /// Returns the current issuance fee in native units.
    pub async fn fee(&self) -> u64 {
        *self.fee.read().await
    }

    /// Replaces the issuance fee. Authorization is the caller's job.
    pub async fn set_fee(&self, new_fee: u64) {
        *self.fee.write().await = new_fee;
    }

    /// Appends a settled trade to the global history.
    pub async fn push_global_trade(&self, record: TradeRecord) {
        self.global_history.write().await.push(record);
    }

    /// Returns a snapshot of the global trade history, oldest first.
    pub async fn global_history(&self) -> Vec<TradeRecord> {
        self.global_history.read().await.clone()
    }

    /// Returns the number of settled trades across all tokens.
    pub async fn global_trade_count(&self) -> usize {
        self.global_history.read().await.len()
    }
}

//! Service layer: business logic orchestration.
//!
//! One service per platform concern: [`IssuanceService`] creates tokens
//! and onboards ledger accounts, [`ExchangeService`] settles trades,
//! [`AdminService`] applies admin-gated mutations, and [`QueryService`]
//! serves the read-only surface. Mutating services emit events through
//! the [`super::domain::EventBus`].

pub mod admin;
pub mod exchange;
pub mod issuance;
pub mod query;

pub use admin::AdminService;
pub use exchange::ExchangeService;
pub use issuance::{IssuanceService, LaunchParams};
pub use query::{PoolSnapshot, QueryService, TokenDetail};

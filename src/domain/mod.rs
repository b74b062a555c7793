//! Domain layer: core types, token registry, ledger, and event system.
//!
//! This module contains the engine's domain model: deterministic account
//! addresses, token records and the issuer capability, constant-product
//! pools with their controller capabilities, the native-coin ledger, the
//! token registry for concurrent per-token storage, platform state, and
//! the event bus for broadcasting market events.

pub mod address;
pub mod event;
pub mod event_bus;
pub mod ledger;
pub mod oracle;
pub mod platform;
pub mod pool;
pub mod registry;
pub mod token;
pub mod token_entry;
pub mod trade;

pub use address::AccountAddress;
pub use event::MarketEvent;
pub use event_bus::EventBus;
pub use ledger::NativeLedger;
pub use platform::PlatformState;
pub use pool::{LiquidityPool, PoolController, get_output_amount};
pub use registry::TokenRegistry;
pub use token::{IssuerCapability, SocialLinks, TokenMeta, TokenSummary};
pub use token_entry::TokenEntry;
pub use trade::{TradeKind, TradeRecord};

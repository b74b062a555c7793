//! # launchpool
//!
//! Token launchpad and constant-product AMM exchange engine with a REST
//! and WebSocket gateway.
//!
//! Anyone can issue a token: issuance mints the full supply, takes a
//! platform fee, and seeds a constant-product liquidity pool against
//! the native coin in the same atomic step, so every token is tradable
//! from the moment it exists. All state is in memory; PostgreSQL is an
//! optional durable audit trail.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── IssuanceService / ExchangeService / AdminService / QueryService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── TokenRegistry + NativeLedger (domain/)
//!     ├── LiquidityPool (domain/)
//!     │
//!     └── PostgreSQL trade log + snapshots (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;

//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` is the market-data feed: clients
//! subscribe by token address and receive launch, trade, and admin
//! events as they are published.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;

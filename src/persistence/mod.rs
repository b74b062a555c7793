//! Persistence layer: PostgreSQL trade log and token snapshots.
//!
//! The engine is memory-first: PostgreSQL is a durable audit trail, not
//! the source of truth. A background writer appends executed trades as
//! they happen, and a snapshot task periodically stores each token's
//! canonical record and pool reserves. The concrete implementation uses
//! `sqlx::PgPool` for async PostgreSQL access.

pub mod models;
pub mod postgres;
pub mod tasks;

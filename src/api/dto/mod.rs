//! Data Transfer Objects for REST request/response serialization.
//!
//! All on-ledger amounts are serialized as JSON strings to prevent
//! precision loss in clients that parse JSON numbers as doubles.

pub mod account_dto;
pub mod admin_dto;
pub mod common_dto;
pub mod token_dto;
pub mod trade_dto;

pub use account_dto::*;
pub use admin_dto::*;
pub use common_dto::*;
pub use token_dto::*;
pub use trade_dto::*;

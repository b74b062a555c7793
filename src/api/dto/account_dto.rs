//! Native-coin account DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /accounts`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterAccountRequest {
    /// Hex-encoded address to register.
    pub address: String,
}

/// Response body for `POST /accounts` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterAccountResponse {
    /// Registered address.
    pub address: String,
    /// `false` when the account already existed (registration is
    /// idempotent).
    pub newly_registered: bool,
}

/// Request body for `POST /accounts/{addr}/deposit`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DepositRequest {
    /// Native coin credited, in base units (string-encoded u64).
    pub amount: String,
}

/// Account balance view for `GET /accounts/{addr}` and deposit
/// responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    /// Hex-encoded account address.
    pub address: String,
    /// Native-coin balance in base units (string-encoded).
    pub balance: String,
}

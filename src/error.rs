//! Engine error types with HTTP status code mapping.
//!
//! [`EngineError`] is the central error type for the platform. Every failed
//! operation reports a specific variant before any state is mutated; each
//! variant maps to a numeric error code and a structured JSON response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::AccountAddress;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "insufficient liquidity in pool",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`EngineError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Engine error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1399 | Validation      | 400 Bad Request            |
/// | 1400–1499 | Authorization   | 403 Forbidden              |
/// | 2000–2999 | State/Not Found | 404 Not Found              |
/// | 3000–3999 | Server          | 500 Internal Server Error  |
/// | 4000–4999 | Funds/Liquidity | 422 Unprocessable Entity   |
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An amount that must be positive was zero.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// An amount was malformed or overflowed the supported range.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Caller is not the platform admin.
    #[error("caller is not the platform admin")]
    NotAdmin,

    /// No token is registered at the given address.
    #[error("token not found: {0}")]
    TokenNotFound(AccountAddress),

    /// The token exists but its pool is missing.
    #[error("pool not found for token: {0}")]
    PoolNotFound(AccountAddress),

    /// The account has no registered native-coin balance.
    #[error("account not registered: {0}")]
    AccountNotRegistered(AccountAddress),

    /// Pool does not have enough liquidity for the trade.
    #[error("insufficient liquidity in pool")]
    InsufficientLiquidity,

    /// Caller balance is too low for the requested operation.
    #[error("insufficient balance: {0}")]
    InsufficientBalance(String),

    /// Minting would exceed the fixed maximum supply.
    #[error("mint would exceed the maximum supply")]
    MaxSupplyExceeded,

    /// The stubbed USD oracle returned a non-positive price.
    #[error("oracle returned an invalid price")]
    InvalidPrice,

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::ZeroAmount => 1002,
            Self::InvalidAmount(_) => 1003,
            Self::NotAdmin => 1401,
            Self::TokenNotFound(_) => 2001,
            Self::PoolNotFound(_) => 2002,
            Self::AccountNotRegistered(_) => 2003,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::InvalidPrice => 3002,
            Self::InsufficientLiquidity => 4001,
            Self::InsufficientBalance(_) => 4002,
            Self::MaxSupplyExceeded => 4003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::ZeroAmount | Self::InvalidAmount(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotAdmin => StatusCode::FORBIDDEN,
            Self::TokenNotFound(_) | Self::PoolNotFound(_) | Self::AccountNotRegistered(_) => {
                StatusCode::NOT_FOUND
            }
            Self::InsufficientLiquidity
            | Self::InsufficientBalance(_)
            | Self::MaxSupplyExceeded => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PersistenceError(_) | Self::Internal(_) | Self::InvalidPrice => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

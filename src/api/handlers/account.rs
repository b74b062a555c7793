//! Native-coin account handlers: registration, deposits, balances.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::parse_amount;
use crate::api::dto::{
    AccountResponse, DepositRequest, RegisterAccountRequest, RegisterAccountResponse,
};
use crate::app_state::AppState;
use crate::domain::AccountAddress;
use crate::error::{EngineError, ErrorResponse};

/// `POST /accounts` — Register a native-coin account.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRequest`] for a malformed address.
/// Registration itself is idempotent.
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    tag = "Accounts",
    summary = "Register an account",
    description = "Registers an address with the native-coin ledger so it can hold balances and trade. Registering an existing account is a no-op.",
    request_body = RegisterAccountRequest,
    responses(
        (status = 201, description = "Account registered", body = RegisterAccountResponse),
        (status = 400, description = "Malformed address", body = ErrorResponse),
    )
)]
pub async fn register_account(
    State(state): State<AppState>,
    Json(req): Json<RegisterAccountRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let address: AccountAddress = req.address.parse()?;
    let newly_registered = state.issuance_service.register_account(address).await;

    Ok((
        StatusCode::CREATED,
        Json(RegisterAccountResponse {
            address: address.to_string(),
            newly_registered,
        }),
    ))
}

/// `POST /accounts/:addr/deposit` — Credit native coin to an account.
///
/// # Errors
///
/// Returns [`EngineError::AccountNotRegistered`] for unknown accounts
/// and [`EngineError::ZeroAmount`] for a zero amount.
#[utoipa::path(
    post,
    path = "/api/v1/accounts/{addr}/deposit",
    tag = "Accounts",
    summary = "Deposit native coin",
    description = "Credits native coin to a registered account and returns the new balance. Development faucet standing in for the external settlement ledger.",
    params(
        ("addr" = String, Path, description = "Account address (64-char hex)"),
    ),
    request_body = DepositRequest,
    responses(
        (status = 200, description = "New balance", body = AccountResponse),
        (status = 400, description = "Invalid amount", body = ErrorResponse),
        (status = 404, description = "Account not registered", body = ErrorResponse),
    )
)]
pub async fn deposit(
    State(state): State<AppState>,
    Path(addr): Path<String>,
    Json(req): Json<DepositRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let account: AccountAddress = addr.parse()?;
    let amount = parse_amount(&req.amount, "amount")?;

    let balance = state.issuance_service.deposit(account, amount).await?;

    Ok(Json(AccountResponse {
        address: account.to_string(),
        balance: balance.to_string(),
    }))
}

/// `GET /accounts/:addr` — Get an account's native-coin balance.
///
/// # Errors
///
/// Returns [`EngineError::AccountNotRegistered`] for unknown accounts.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{addr}",
    tag = "Accounts",
    summary = "Get account balance",
    params(
        ("addr" = String, Path, description = "Account address (64-char hex)"),
    ),
    responses(
        (status = 200, description = "Account balance", body = AccountResponse),
        (status = 404, description = "Account not registered", body = ErrorResponse),
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(addr): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    let account: AccountAddress = addr.parse()?;
    let balance = state.query_service.native_balance(account).await?;

    Ok(Json(AccountResponse {
        address: account.to_string(),
        balance: balance.to_string(),
    }))
}

/// Account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(register_account))
        .route("/accounts/{addr}/deposit", post(deposit))
        .route("/accounts/{addr}", get(get_account))
}

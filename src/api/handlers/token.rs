//! Token issuance and registry read handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::parse_amount;
use crate::api::dto::{
    CreateTokenRequest, PaginationMeta, PaginationParams, PoolInfoResponse, TokenBalanceResponse,
    TokenDetailResponse, TokenListResponse, TokenResponse, TokenSummaryDto,
};
use crate::app_state::AppState;
use crate::domain::AccountAddress;
use crate::error::{EngineError, ErrorResponse};
use crate::service::LaunchParams;

/// `POST /tokens` — Issue a new token and seed its trading pool.
///
/// # Errors
///
/// Returns [`EngineError`] on invalid parameters, an unregistered or
/// underfunded creator, or a duplicate (creator, name) launch.
#[utoipa::path(
    post,
    path = "/api/v1/tokens",
    tag = "Tokens",
    summary = "Issue a new token",
    description = "Mints a token with the given metadata, allocates 5% of the supply to the creator, and seeds a pool with the remaining 95% against the caller's native funding. The platform fee is charged to the caller.",
    request_body = CreateTokenRequest,
    responses(
        (status = 201, description = "Token issued and pool seeded", body = TokenResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Creator account not registered", body = ErrorResponse),
        (status = 422, description = "Creator cannot fund fee plus pool", body = ErrorResponse),
    )
)]
pub async fn create_token(
    State(state): State<AppState>,
    Json(req): Json<CreateTokenRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let creator: AccountAddress = req.caller.parse()?;
    let supply = parse_amount(&req.supply, "supply")?;
    let initial_native_amount = parse_amount(&req.initial_native_amount, "initial_native_amount")?;

    let meta = state
        .issuance_service
        .create_token(LaunchParams {
            creator,
            name: req.name,
            symbol: req.symbol,
            supply,
            description: req.description,
            icon_uri: req.icon_uri,
            project_url: req.project_url,
            social_links: req.social_links.into(),
            initial_native_amount,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TokenResponse::from(&meta))))
}

/// `GET /tokens` — List all tokens with pagination.
///
/// # Errors
///
/// Returns [`EngineError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/tokens",
    tag = "Tokens",
    summary = "List tokens",
    description = "Returns a paginated list of token summaries in issuance order.",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-indexed)"),
        ("per_page" = Option<u32>, Query, description = "Items per page (max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated token list", body = TokenListResponse),
    )
)]
pub async fn list_tokens(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, EngineError> {
    let params = params.clamped();
    let summaries = state.query_service.list_tokens().await;

    let total = summaries.len() as u32;
    let per_page = params.per_page;
    let page = params.page;
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(per_page)
    };

    let start = ((page - 1) * per_page) as usize;
    let data: Vec<TokenSummaryDto> = summaries
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .map(TokenSummaryDto::from)
        .collect();

    Ok(Json(TokenListResponse {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// `GET /tokens/:addr` — Get token detail with live pool state.
///
/// # Errors
///
/// Returns [`EngineError::TokenNotFound`] if no token is registered at
/// the address.
#[utoipa::path(
    get,
    path = "/api/v1/tokens/{addr}",
    tag = "Tokens",
    summary = "Get token detail",
    description = "Returns the canonical token record together with its pool snapshot, holder count, and trade count, read under one lock.",
    params(
        ("addr" = String, Path, description = "Token address (64-char hex)"),
    ),
    responses(
        (status = 200, description = "Token detail", body = TokenDetailResponse),
        (status = 400, description = "Malformed address", body = ErrorResponse),
        (status = 404, description = "Token not found", body = ErrorResponse),
    )
)]
pub async fn get_token(
    State(state): State<AppState>,
    Path(addr): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    let token_address: AccountAddress = addr.parse()?;
    let detail = state.query_service.token_detail(token_address).await?;

    Ok(Json(TokenDetailResponse {
        token: TokenResponse::from(&detail.meta),
        pool: PoolInfoResponse::from(detail.pool),
        holders: detail.holders as u64,
        trade_count: detail.trade_count as u64,
    }))
}

/// `GET /tokens/:addr/balance/:account` — Get one holder's token balance.
///
/// # Errors
///
/// Returns [`EngineError::TokenNotFound`] if no token is registered at
/// the address. Accounts that never traded the token report zero.
#[utoipa::path(
    get,
    path = "/api/v1/tokens/{addr}/balance/{account}",
    tag = "Tokens",
    summary = "Get a holder's token balance",
    params(
        ("addr" = String, Path, description = "Token address (64-char hex)"),
        ("account" = String, Path, description = "Holder address (64-char hex)"),
    ),
    responses(
        (status = 200, description = "Holder balance", body = TokenBalanceResponse),
        (status = 404, description = "Token not found", body = ErrorResponse),
    )
)]
pub async fn get_token_balance(
    State(state): State<AppState>,
    Path((addr, account)): Path<(String, String)>,
) -> Result<impl IntoResponse, EngineError> {
    let token_address: AccountAddress = addr.parse()?;
    let holder: AccountAddress = account.parse()?;
    let balance = state
        .query_service
        .token_balance(token_address, holder)
        .await?;

    Ok(Json(TokenBalanceResponse {
        token_address: token_address.to_string(),
        account: holder.to_string(),
        balance: balance.to_string(),
    }))
}

/// Token lifecycle and registry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tokens", post(create_token).get(list_tokens))
        .route("/tokens/{addr}", get(get_token))
        .route("/tokens/{addr}/balance/{account}", get(get_token_balance))
}

//! Trade execution, quote, pool-info, and history handlers.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use super::parse_amount;
use crate::api::dto::{
    BuyRequest, PoolInfoResponse, QuoteBuyParams, QuoteResponse, QuoteSellParams, SellRequest,
    TradeResponse,
};
use crate::app_state::AppState;
use crate::domain::AccountAddress;
use crate::error::{EngineError, ErrorResponse};

/// `POST /tokens/:addr/buy` — Buy tokens with native coin.
///
/// # Errors
///
/// Returns [`EngineError`] on invalid parameters, a missing token, an
/// unregistered or underfunded trader, or a quote of zero output.
#[utoipa::path(
    post,
    path = "/api/v1/tokens/{addr}/buy",
    tag = "Trading",
    summary = "Buy tokens",
    description = "Spends the given native amount against the pool at the fee-adjusted constant-product price. The settled trade is appended to the token's history and the global history.",
    params(
        ("addr" = String, Path, description = "Token address (64-char hex)"),
    ),
    request_body = BuyRequest,
    responses(
        (status = 200, description = "Trade settled", body = TradeResponse),
        (status = 400, description = "Invalid trade parameters", body = ErrorResponse),
        (status = 404, description = "Token or trader account not found", body = ErrorResponse),
        (status = 422, description = "Insufficient balance or liquidity", body = ErrorResponse),
    )
)]
pub async fn buy(
    State(state): State<AppState>,
    Path(addr): Path<String>,
    Json(req): Json<BuyRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let trader: AccountAddress = req.caller.parse()?;
    let token_address: AccountAddress = addr.parse()?;
    let native_amount = parse_amount(&req.native_amount, "native_amount")?;

    let record = state
        .exchange_service
        .buy(trader, token_address, native_amount)
        .await?;

    Ok(Json(TradeResponse::from(&record)))
}

/// `POST /tokens/:addr/sell` — Sell tokens back to the pool.
///
/// # Errors
///
/// Same taxonomy as [`buy`]; insufficient balance here means the trader
/// holds fewer tokens than offered.
#[utoipa::path(
    post,
    path = "/api/v1/tokens/{addr}/sell",
    tag = "Trading",
    summary = "Sell tokens",
    description = "Sells the given token amount back to the pool for native coin at the fee-adjusted constant-product price.",
    params(
        ("addr" = String, Path, description = "Token address (64-char hex)"),
    ),
    request_body = SellRequest,
    responses(
        (status = 200, description = "Trade settled", body = TradeResponse),
        (status = 400, description = "Invalid trade parameters", body = ErrorResponse),
        (status = 404, description = "Token or trader account not found", body = ErrorResponse),
        (status = 422, description = "Insufficient balance or liquidity", body = ErrorResponse),
    )
)]
pub async fn sell(
    State(state): State<AppState>,
    Path(addr): Path<String>,
    Json(req): Json<SellRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let trader: AccountAddress = req.caller.parse()?;
    let token_address: AccountAddress = addr.parse()?;
    let token_amount = parse_amount(&req.token_amount, "token_amount")?;

    let record = state
        .exchange_service
        .sell(trader, token_address, token_amount)
        .await?;

    Ok(Json(TradeResponse::from(&record)))
}

/// `POST /tokens/:addr/swap/native-to-token` — Alias for [`buy`].
///
/// # Errors
///
/// Same taxonomy as [`buy`].
#[utoipa::path(
    post,
    path = "/api/v1/tokens/{addr}/swap/native-to-token",
    tag = "Trading",
    summary = "Swap native coin for tokens",
    description = "Alternate name for the buy operation; settles through the identical code path.",
    params(
        ("addr" = String, Path, description = "Token address (64-char hex)"),
    ),
    request_body = BuyRequest,
    responses(
        (status = 200, description = "Trade settled", body = TradeResponse),
        (status = 422, description = "Insufficient balance or liquidity", body = ErrorResponse),
    )
)]
pub async fn swap_native_to_token(
    state: State<AppState>,
    path: Path<String>,
    req: Json<BuyRequest>,
) -> Result<impl IntoResponse, EngineError> {
    buy(state, path, req).await
}

/// `POST /tokens/:addr/swap/token-to-native` — Alias for [`sell`].
///
/// # Errors
///
/// Same taxonomy as [`sell`].
#[utoipa::path(
    post,
    path = "/api/v1/tokens/{addr}/swap/token-to-native",
    tag = "Trading",
    summary = "Swap tokens for native coin",
    description = "Alternate name for the sell operation; settles through the identical code path.",
    params(
        ("addr" = String, Path, description = "Token address (64-char hex)"),
    ),
    request_body = SellRequest,
    responses(
        (status = 200, description = "Trade settled", body = TradeResponse),
        (status = 422, description = "Insufficient balance or liquidity", body = ErrorResponse),
    )
)]
pub async fn swap_token_to_native(
    state: State<AppState>,
    path: Path<String>,
    req: Json<SellRequest>,
) -> Result<impl IntoResponse, EngineError> {
    sell(state, path, req).await
}

/// `GET /tokens/:addr/quote/buy` — Quote a buy without executing it.
///
/// # Errors
///
/// Returns [`EngineError`] on invalid parameters, a missing token, or a
/// quote of zero output.
#[utoipa::path(
    get,
    path = "/api/v1/tokens/{addr}/quote/buy",
    tag = "Trading",
    summary = "Quote a buy",
    description = "Returns the token output a buy of the given native amount would settle at against current reserves. The pool is not modified and no fee is charged.",
    params(
        ("addr" = String, Path, description = "Token address (64-char hex)"),
        ("native_amount" = String, Query, description = "Native coin spent, in base units"),
    ),
    responses(
        (status = 200, description = "Quote computed", body = QuoteResponse),
        (status = 404, description = "Token not found", body = ErrorResponse),
        (status = 422, description = "Insufficient liquidity", body = ErrorResponse),
    )
)]
pub async fn quote_buy(
    State(state): State<AppState>,
    Path(addr): Path<String>,
    Query(params): Query<QuoteBuyParams>,
) -> Result<impl IntoResponse, EngineError> {
    let token_address: AccountAddress = addr.parse()?;
    let native_amount = parse_amount(&params.native_amount, "native_amount")?;

    let output = state
        .query_service
        .quote_buy(token_address, native_amount)
        .await?;
    let pool = state.query_service.pool_info(token_address).await?;

    Ok(Json(QuoteResponse {
        token_address: token_address.to_string(),
        direction: "buy".to_string(),
        input_amount: native_amount.to_string(),
        output_amount: output.to_string(),
        spot_price: pool.spot_price.to_string(),
        quoted_at: Utc::now(),
    }))
}

/// `GET /tokens/:addr/quote/sell` — Quote a sell without executing it.
///
/// # Errors
///
/// Same taxonomy as [`quote_buy`].
#[utoipa::path(
    get,
    path = "/api/v1/tokens/{addr}/quote/sell",
    tag = "Trading",
    summary = "Quote a sell",
    description = "Returns the native output a sell of the given token amount would settle at against current reserves. The pool is not modified and no fee is charged.",
    params(
        ("addr" = String, Path, description = "Token address (64-char hex)"),
        ("token_amount" = String, Query, description = "Tokens sold, in base units"),
    ),
    responses(
        (status = 200, description = "Quote computed", body = QuoteResponse),
        (status = 404, description = "Token not found", body = ErrorResponse),
        (status = 422, description = "Insufficient liquidity", body = ErrorResponse),
    )
)]
pub async fn quote_sell(
    State(state): State<AppState>,
    Path(addr): Path<String>,
    Query(params): Query<QuoteSellParams>,
) -> Result<impl IntoResponse, EngineError> {
    let token_address: AccountAddress = addr.parse()?;
    let token_amount = parse_amount(&params.token_amount, "token_amount")?;

    let output = state
        .query_service
        .quote_sell(token_address, token_amount)
        .await?;
    let pool = state.query_service.pool_info(token_address).await?;

    Ok(Json(QuoteResponse {
        token_address: token_address.to_string(),
        direction: "sell".to_string(),
        input_amount: token_amount.to_string(),
        output_amount: output.to_string(),
        spot_price: pool.spot_price.to_string(),
        quoted_at: Utc::now(),
    }))
}

/// `GET /tokens/:addr/pool` — Get a token's pool reserves and price.
///
/// # Errors
///
/// Returns [`EngineError::TokenNotFound`] if no token is registered at
/// the address.
#[utoipa::path(
    get,
    path = "/api/v1/tokens/{addr}/pool",
    tag = "Trading",
    summary = "Get pool info by token address",
    params(
        ("addr" = String, Path, description = "Token address (64-char hex)"),
    ),
    responses(
        (status = 200, description = "Pool snapshot", body = PoolInfoResponse),
        (status = 404, description = "Token not found", body = ErrorResponse),
    )
)]
pub async fn get_token_pool(
    State(state): State<AppState>,
    Path(addr): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    let token_address: AccountAddress = addr.parse()?;
    let snapshot = state.query_service.pool_info(token_address).await?;
    Ok(Json(PoolInfoResponse::from(snapshot)))
}

/// `GET /pools/:pool_addr` — Get pool info by pool address.
///
/// Pool addresses derive deterministically from token addresses, so a
/// caller holding only the derived pool address can still resolve the
/// pool.
///
/// # Errors
///
/// Returns [`EngineError::PoolNotFound`] if no pool exists at the
/// address.
#[utoipa::path(
    get,
    path = "/api/v1/pools/{pool_addr}",
    tag = "Trading",
    summary = "Get pool info by pool address",
    params(
        ("pool_addr" = String, Path, description = "Pool address (64-char hex)"),
    ),
    responses(
        (status = 200, description = "Pool snapshot", body = PoolInfoResponse),
        (status = 404, description = "Pool not found", body = ErrorResponse),
    )
)]
pub async fn get_pool_by_address(
    State(state): State<AppState>,
    Path(pool_addr): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    let pool_address: AccountAddress = pool_addr.parse()?;
    let snapshot = state.query_service.pool_info_by_address(pool_address).await?;
    Ok(Json(PoolInfoResponse::from(snapshot)))
}

/// `GET /tokens/:addr/history` — List a token's settled trades.
///
/// # Errors
///
/// Returns [`EngineError::TokenNotFound`] if no token is registered at
/// the address.
#[utoipa::path(
    get,
    path = "/api/v1/tokens/{addr}/history",
    tag = "Trading",
    summary = "Get a token's trade history",
    description = "Returns every trade settled against the token, oldest first.",
    params(
        ("addr" = String, Path, description = "Token address (64-char hex)"),
    ),
    responses(
        (status = 200, description = "Trade records", body = Vec<TradeResponse>),
        (status = 404, description = "Token not found", body = ErrorResponse),
    )
)]
pub async fn token_history(
    State(state): State<AppState>,
    Path(addr): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    let token_address: AccountAddress = addr.parse()?;
    let records = state.query_service.token_history(token_address).await?;
    let data: Vec<TradeResponse> = records.iter().map(TradeResponse::from).collect();
    Ok(Json(data))
}

/// `GET /history` — List all settled trades across every token.
#[utoipa::path(
    get,
    path = "/api/v1/history",
    tag = "Trading",
    summary = "Get the global trade history",
    description = "Returns every trade settled on the platform, oldest first.",
    responses(
        (status = 200, description = "Trade records", body = Vec<TradeResponse>),
    )
)]
pub async fn global_history(State(state): State<AppState>) -> impl IntoResponse {
    let records = state.query_service.global_history().await;
    let data: Vec<TradeResponse> = records.iter().map(TradeResponse::from).collect();
    Json(data)
}

/// Trading and market-data routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tokens/{addr}/buy", post(buy))
        .route("/tokens/{addr}/sell", post(sell))
        .route(
            "/tokens/{addr}/swap/native-to-token",
            post(swap_native_to_token),
        )
        .route(
            "/tokens/{addr}/swap/token-to-native",
            post(swap_token_to_native),
        )
        .route("/tokens/{addr}/quote/buy", get(quote_buy))
        .route("/tokens/{addr}/quote/sell", get(quote_sell))
        .route("/tokens/{addr}/pool", get(get_token_pool))
        .route("/tokens/{addr}/history", get(token_history))
        .route("/pools/{pool_addr}", get(get_pool_by_address))
        .route("/history", get(global_history))
}

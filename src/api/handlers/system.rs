//! System endpoints: health check and platform configuration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::oracle::NATIVE_USD_CENTS;
use crate::domain::pool::TRADE_FEE_BPS;
use crate::domain::token::TOKEN_DECIMALS;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Platform parameters and constants.
#[derive(Debug, Serialize, ToSchema)]
struct PlatformConfigResponse {
    platform_fee: String,
    admin_address: String,
    token_decimals: u8,
    trade_fee_bps: u32,
    native_usd_cents: String,
}

/// `GET /config/platform` — Current platform parameters.
#[utoipa::path(
    get,
    path = "/config/platform",
    tag = "System",
    summary = "Platform parameters",
    description = "Returns the current issuance fee, admin address, and the fixed trading constants.",
    responses(
        (status = 200, description = "Platform parameters", body = PlatformConfigResponse),
    )
)]
pub async fn platform_config_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(PlatformConfigResponse {
            platform_fee: state.platform.fee().await.to_string(),
            admin_address: state.platform.admin().to_string(),
            token_decimals: TOKEN_DECIMALS,
            trade_fee_bps: TRADE_FEE_BPS,
            native_usd_cents: NATIVE_USD_CENTS.to_string(),
        }),
    )
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/platform", get(platform_config_handler))
}

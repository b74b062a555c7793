//! Admin mutation handlers, gated on the platform admin identity.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::put;
use axum::{Json, Router};
use chrono::Utc;

use super::parse_amount;
use crate::api::dto::{TokenResponse, UpdateFeeRequest, UpdateFeeResponse, UpdateMetadataRequest};
use crate::app_state::AppState;
use crate::domain::AccountAddress;
use crate::error::{EngineError, ErrorResponse};

/// `PUT /admin/fee` — Replace the platform issuance fee.
///
/// # Errors
///
/// Returns [`EngineError::NotAdmin`] unless the caller is the platform
/// admin.
#[utoipa::path(
    put,
    path = "/api/v1/admin/fee",
    tag = "Admin",
    summary = "Update the platform fee",
    description = "Replaces the fee charged on every token issuance. Only the platform admin may call this.",
    request_body = UpdateFeeRequest,
    responses(
        (status = 200, description = "Fee updated", body = UpdateFeeResponse),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
    )
)]
pub async fn update_fee(
    State(state): State<AppState>,
    Json(req): Json<UpdateFeeRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let caller: AccountAddress = req.caller.parse()?;
    let new_fee = parse_amount(&req.new_fee, "new_fee")?;

    let fee = state.admin_service.update_fee(caller, new_fee).await?;

    Ok(Json(UpdateFeeResponse {
        new_fee: fee.to_string(),
        updated_at: Utc::now(),
    }))
}

/// `PUT /admin/tokens/:addr/metadata` — Replace a token's mutable
/// metadata.
///
/// # Errors
///
/// Returns [`EngineError::NotAdmin`] unless the caller is the platform
/// admin, and [`EngineError::TokenNotFound`] for an unknown token.
#[utoipa::path(
    put,
    path = "/api/v1/admin/tokens/{addr}/metadata",
    tag = "Admin",
    summary = "Update token metadata",
    description = "Replaces the icon and project URLs on the canonical token record. Listings derive from the same record, so both views update together.",
    params(
        ("addr" = String, Path, description = "Token address (64-char hex)"),
    ),
    request_body = UpdateMetadataRequest,
    responses(
        (status = 200, description = "Updated token record", body = TokenResponse),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
        (status = 404, description = "Token not found", body = ErrorResponse),
    )
)]
pub async fn update_token_metadata(
    State(state): State<AppState>,
    Path(addr): Path<String>,
    Json(req): Json<UpdateMetadataRequest>,
) -> Result<impl IntoResponse, EngineError> {
    let caller: AccountAddress = req.caller.parse()?;
    let token_address: AccountAddress = addr.parse()?;

    let meta = state
        .admin_service
        .update_token_metadata(caller, token_address, req.icon_uri, req.project_url)
        .await?;

    Ok(Json(TokenResponse::from(&meta)))
}

/// Admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/fee", put(update_fee))
        .route("/admin/tokens/{addr}/metadata", put(update_token_metadata))
}

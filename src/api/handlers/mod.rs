//! REST endpoint handlers organized by resource.

pub mod account;
pub mod admin;
pub mod system;
pub mod token;
pub mod trade;

use axum::Router;

use crate::app_state::AppState;
use crate::error::EngineError;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(token::routes())
        .merge(trade::routes())
        .merge(admin::routes())
        .merge(account::routes())
}

/// Parses a string-encoded base-unit amount from a request field.
fn parse_amount(value: &str, field: &str) -> Result<u64, EngineError> {
    value
        .parse()
        .map_err(|_| EngineError::InvalidRequest(format!("invalid {field}: {value}")))
}

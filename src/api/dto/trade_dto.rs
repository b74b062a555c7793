//! Trading, quote, and pool-info DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::TradeRecord;
use crate::service::PoolSnapshot;

/// Request body for `POST /tokens/{addr}/buy` and the
/// native-to-token swap alias.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BuyRequest {
    /// Hex-encoded trader address.
    pub caller: String,
    /// Native coin spent, in base units (string-encoded u64).
    pub native_amount: String,
}

/// Request body for `POST /tokens/{addr}/sell` and the
/// token-to-native swap alias.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SellRequest {
    /// Hex-encoded trader address.
    pub caller: String,
    /// Tokens sold, in base units (string-encoded u64).
    pub token_amount: String,
}

/// Settled trade, returned by every execution endpoint and listed by
/// the history endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct TradeResponse {
    /// Unique trade identifier.
    pub trade_id: String,
    /// Hex-encoded token address.
    pub token_address: String,
    /// Trade direction: `"buy"` or `"sell"`.
    pub kind: String,
    /// Native side of the trade in base units (string-encoded).
    pub native_amount: String,
    /// Token side of the trade in base units (string-encoded).
    pub token_amount: String,
    /// Receiving side (the pool address on sells).
    pub buyer: String,
    /// Paying side (the pool address on buys).
    pub seller: String,
    /// Estimated USD value of the input, in cents (string-encoded).
    pub estimated_usd_in_cents: String,
    /// Estimated USD value of the output, in cents (string-encoded).
    pub estimated_usd_out_cents: String,
    /// Settlement timestamp.
    pub executed_at: DateTime<Utc>,
}

impl From<&TradeRecord> for TradeResponse {
    fn from(record: &TradeRecord) -> Self {
        Self {
            trade_id: record.id.to_string(),
            token_address: record.token_address.to_string(),
            kind: record.kind.as_str().to_string(),
            native_amount: record.native_amount.to_string(),
            token_amount: record.token_amount.to_string(),
            buyer: record.buyer.to_string(),
            seller: record.seller.to_string(),
            estimated_usd_in_cents: record.estimated_usd_in_cents.to_string(),
            estimated_usd_out_cents: record.estimated_usd_out_cents.to_string(),
            executed_at: record.timestamp,
        }
    }
}

/// Query parameters for `GET /tokens/{addr}/quote/buy`.
#[derive(Debug, Deserialize)]
pub struct QuoteBuyParams {
    /// Native coin spent, in base units (string-encoded u64).
    pub native_amount: String,
}

/// Query parameters for `GET /tokens/{addr}/quote/sell`.
#[derive(Debug, Deserialize)]
pub struct QuoteSellParams {
    /// Tokens sold, in base units (string-encoded u64).
    pub token_amount: String,
}

/// Response body for the quote endpoints (read-only, no fee).
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    /// Hex-encoded token address.
    pub token_address: String,
    /// Quote direction: `"buy"` or `"sell"`.
    pub direction: String,
    /// Input amount the quote was computed for (string-encoded).
    pub input_amount: String,
    /// Output the trade would settle at against current reserves.
    pub output_amount: String,
    /// Current spot price in native base units per whole token.
    pub spot_price: String,
    /// Quote timestamp.
    pub quoted_at: DateTime<Utc>,
}

/// Pool reserves and price for `GET /tokens/{addr}/pool` and
/// `GET /pools/{pool_addr}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolInfoResponse {
    /// Hex-encoded token address.
    pub token_address: String,
    /// Hex-encoded pool address.
    pub pool_address: String,
    /// Token-side reserve in base units (string-encoded).
    pub token_reserve: String,
    /// Native-side reserve in base units (string-encoded).
    pub native_reserve: String,
    /// Spot price in native base units per whole token (string-encoded).
    pub spot_price: String,
}

impl From<PoolSnapshot> for PoolInfoResponse {
    fn from(snapshot: PoolSnapshot) -> Self {
        Self {
            token_address: snapshot.token_address.to_string(),
            pool_address: snapshot.pool_address.to_string(),
            token_reserve: snapshot.token_reserve.to_string(),
            native_reserve: snapshot.native_reserve.to_string(),
            spot_price: snapshot.spot_price.to_string(),
        }
    }
}

//! Admin mutation DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `PUT /admin/fee`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFeeRequest {
    /// Hex-encoded caller address; must be the platform admin.
    pub caller: String,
    /// New platform fee in native base units (string-encoded u64).
    pub new_fee: String,
}

/// Response body for `PUT /admin/fee`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateFeeResponse {
    /// Fee now charged per issuance (string-encoded).
    pub new_fee: String,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Request body for `PUT /admin/tokens/{addr}/metadata`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMetadataRequest {
    /// Hex-encoded caller address; must be the platform admin.
    pub caller: String,
    /// Replacement icon URL.
    pub icon_uri: String,
    /// Replacement project website URL.
    pub project_url: String,
}

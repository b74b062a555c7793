//! Token issuance and registry DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use super::trade_dto::PoolInfoResponse;
use crate::domain::{SocialLinks, TokenMeta, TokenSummary};

/// Community links as carried in token metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SocialLinksDto {
    /// Telegram group URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    /// Twitter/X profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Discord invite URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
}

impl From<&SocialLinks> for SocialLinksDto {
    fn from(links: &SocialLinks) -> Self {
        Self {
            telegram: links.telegram.clone(),
            twitter: links.twitter.clone(),
            discord: links.discord.clone(),
        }
    }
}

impl From<SocialLinksDto> for SocialLinks {
    fn from(dto: SocialLinksDto) -> Self {
        Self {
            telegram: dto.telegram,
            twitter: dto.twitter,
            discord: dto.discord,
        }
    }
}

/// Request body for `POST /tokens`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTokenRequest {
    /// Hex-encoded address of the issuing account.
    pub caller: String,
    /// Token display name (max 64 chars).
    pub name: String,
    /// Ticker symbol (max 16 chars).
    pub symbol: String,
    /// Total supply in whole tokens (string-encoded u64).
    pub supply: String,
    /// Free-form project description.
    #[serde(default)]
    pub description: String,
    /// Icon URL stored verbatim.
    #[serde(default)]
    pub icon_uri: String,
    /// Project website URL.
    #[serde(default)]
    pub project_url: String,
    /// Optional community links.
    #[serde(default)]
    pub social_links: SocialLinksDto,
    /// Native coin seeding the pool (string-encoded base units).
    pub initial_native_amount: String,
}

/// Full token record for `POST /tokens` (201) and token detail reads.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Hex-encoded token address.
    pub token_address: String,
    /// Hex-encoded pool address derived from the token address.
    pub pool_address: String,
    /// Hex-encoded creator address.
    pub creator: String,
    /// Token display name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Project description.
    pub description: String,
    /// Icon URL.
    pub icon_uri: String,
    /// Project website URL.
    pub project_url: String,
    /// Community links.
    pub social_links: SocialLinksDto,
    /// Total supply in base units (string-encoded).
    pub supply: String,
    /// Current price in native base units per whole token (string-encoded).
    pub current_price: String,
    /// Issuance timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&TokenMeta> for TokenResponse {
    fn from(meta: &TokenMeta) -> Self {
        Self {
            token_address: meta.token_address.to_string(),
            pool_address: meta.pool_address.to_string(),
            creator: meta.creator.to_string(),
            name: meta.name.clone(),
            symbol: meta.symbol.clone(),
            description: meta.description.clone(),
            icon_uri: meta.icon_uri.clone(),
            project_url: meta.project_url.clone(),
            social_links: SocialLinksDto::from(&meta.social_links),
            supply: meta.supply.to_string(),
            current_price: meta.current_price.to_string(),
            created_at: meta.created_at,
        }
    }
}

/// Token summary for list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenSummaryDto {
    /// Hex-encoded token address.
    pub token_address: String,
    /// Token display name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Icon URL.
    pub icon_uri: String,
    /// Current price (string-encoded).
    pub current_price: String,
    /// Total supply in base units (string-encoded).
    pub supply: String,
    /// Issuance timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<TokenSummary> for TokenSummaryDto {
    fn from(summary: TokenSummary) -> Self {
        Self {
            token_address: summary.token_address.to_string(),
            name: summary.name,
            symbol: summary.symbol,
            icon_uri: summary.icon_uri,
            current_price: summary.current_price.to_string(),
            supply: summary.supply.to_string(),
            created_at: summary.created_at,
        }
    }
}

/// Paginated list response for `GET /tokens`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenListResponse {
    /// Token summaries in issuance order.
    pub data: Vec<TokenSummaryDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Token detail with live pool state for `GET /tokens/{addr}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenDetailResponse {
    /// Canonical token record.
    pub token: TokenResponse,
    /// Pool snapshot taken in the same read.
    pub pool: PoolInfoResponse,
    /// Distinct accounts holding a non-zero balance.
    pub holders: u64,
    /// Trades settled against this token.
    pub trade_count: u64,
}

/// Per-holder balance for `GET /tokens/{addr}/balance/{account}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenBalanceResponse {
    /// Hex-encoded token address.
    pub token_address: String,
    /// Hex-encoded holder address.
    pub account: String,
    /// Balance in token base units (string-encoded).
    pub balance: String,
}

//! Database models for the trade log and token snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored trade row from the `trades` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTrade {
    /// Auto-increment row ID.
    pub id: i64,
    /// Trade record identifier.
    pub trade_id: Uuid,
    /// Hex-encoded token address the trade settled against.
    pub token_address: String,
    /// Trade direction (`"buy"` or `"sell"`).
    pub kind: String,
    /// JSONB payload mirroring the full trade event.
    pub payload: serde_json::Value,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A token snapshot row from the `token_snapshots` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSnapshot {
    /// Auto-increment row ID.
    pub id: i64,
    /// Hex-encoded token address.
    pub token_address: String,
    /// Canonical token record as JSONB.
    pub metadata_json: serde_json::Value,
    /// Pool reserves and price as JSONB.
    pub pool_json: serde_json::Value,
    /// Snapshot timestamp.
    pub snapshot_at: DateTime<Utc>,
}

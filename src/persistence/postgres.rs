//! PostgreSQL implementation of the persistence layer.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use super::models::TokenSnapshot;
use crate::config::GatewayConfig;
use crate::error::EngineError;

/// PostgreSQL-backed persistence layer using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to PostgreSQL using the gateway configuration and ensures
    /// the schema exists.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError::PersistenceError`] if the connection or
    /// schema setup fails.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, EngineError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| EngineError::PersistenceError(e.to_string()))?;

        let persistence = Self::new(pool);
        persistence.init_schema().await?;
        Ok(persistence)
    }

    /// Creates the trade log and snapshot tables if they do not exist.
    async fn init_schema(&self) -> Result<(), EngineError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS trades ( \
                 id BIGSERIAL PRIMARY KEY, \
                 trade_id UUID NOT NULL UNIQUE, \
                 token_address TEXT NOT NULL, \
                 kind TEXT NOT NULL, \
                 payload JSONB NOT NULL, \
                 created_at TIMESTAMPTZ NOT NULL DEFAULT NOW() \
             )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| EngineError::PersistenceError(e.to_string()))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_trades_token_time \
             ON trades (token_address, created_at DESC)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| EngineError::PersistenceError(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS token_snapshots ( \
                 id BIGSERIAL PRIMARY KEY, \
                 token_address TEXT NOT NULL, \
                 metadata_json JSONB NOT NULL, \
                 pool_json JSONB NOT NULL, \
                 snapshot_at TIMESTAMPTZ NOT NULL DEFAULT NOW() \
             )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| EngineError::PersistenceError(e.to_string()))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_token_snapshots_token_time \
             ON token_snapshots (token_address, snapshot_at DESC)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| EngineError::PersistenceError(e.to_string()))?;

        Ok(())
    }

    /// Appends an executed trade to the trade log.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError::PersistenceError`] on database failure.
    pub async fn save_trade(
        &self,
        trade_id: Uuid,
        token_address: &str,
        kind: &str,
        payload: &serde_json::Value,
    ) -> Result<i64, EngineError> {
        let row = sqlx::query_scalar::<_, i64>(
            "INSERT INTO trades (trade_id, token_address, kind, payload) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(trade_id)
        .bind(token_address)
        .bind(kind)
        .bind(payload)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| EngineError::PersistenceError(e.to_string()))?;

        Ok(row)
    }

    /// Saves a token state snapshot.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError::PersistenceError`] on database failure.
    pub async fn save_snapshot(
        &self,
        token_address: &str,
        metadata_json: &serde_json::Value,
        pool_json: &serde_json::Value,
    ) -> Result<i64, EngineError> {
        let row = sqlx::query_scalar::<_, i64>(
            "INSERT INTO token_snapshots (token_address, metadata_json, pool_json) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(token_address)
        .bind(metadata_json)
        .bind(pool_json)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| EngineError::PersistenceError(e.to_string()))?;

        Ok(row)
    }

    /// Loads the latest snapshot for each token using `DISTINCT ON`.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError::PersistenceError`] on database failure.
    pub async fn load_latest_snapshots(&self) -> Result<Vec<TokenSnapshot>, EngineError> {
        let rows = sqlx::query_as::<_, (i64, String, serde_json::Value, serde_json::Value, DateTime<Utc>)>(
            "SELECT DISTINCT ON (token_address) id, token_address, metadata_json, pool_json, snapshot_at \
             FROM token_snapshots ORDER BY token_address, snapshot_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| EngineError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, token_address, metadata_json, pool_json, snapshot_at)| TokenSnapshot {
                    id,
                    token_address,
                    metadata_json,
                    pool_json,
                    snapshot_at,
                },
            )
            .collect())
    }

    /// Deletes snapshots older than the given number of days.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError::PersistenceError`] on database failure.
    pub async fn delete_old_snapshots(&self, before_days: u64) -> Result<u64, EngineError> {
        let cutoff =
            Utc::now() - chrono::Duration::days(i64::try_from(before_days).unwrap_or(i64::MAX));

        let result = sqlx::query("DELETE FROM token_snapshots WHERE snapshot_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| EngineError::PersistenceError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

//! Background persistence tasks.
//!
//! Two long-running tasks bridge the in-memory engine to PostgreSQL:
//! a trade log writer that consumes the market event bus, and a
//! periodic snapshot task that walks the token registry. Both degrade
//! to warnings on database failure so trading never blocks on storage.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::domain::{MarketEvent, PlatformState};
use crate::persistence::postgres::PostgresPersistence;

/// Consumes the market event bus and appends every executed trade to
/// the durable trade log. Runs until the bus is closed.
pub async fn run_trade_log(
    persistence: PostgresPersistence,
    mut event_rx: broadcast::Receiver<MarketEvent>,
) {
    info!("trade log writer started");
    loop {
        match event_rx.recv().await {
            Ok(event) => {
                let MarketEvent::TradeExecuted {
                    token_address,
                    trade_id,
                    kind,
                    ..
                } = &event
                else {
                    continue;
                };
                let payload = match serde_json::to_value(&event) {
                    Ok(value) => value,
                    Err(e) => {
                        warn!("failed to serialize trade {trade_id}: {e}");
                        continue;
                    }
                };
                let token = token_address.to_string();
                if let Err(e) = persistence
                    .save_trade(*trade_id, &token, kind.as_str(), &payload)
                    .await
                {
                    warn!("failed to persist trade {trade_id}: {e}");
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("trade log writer lagged, {skipped} events dropped from the log");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    info!("trade log writer stopped: event bus closed");
}

/// Periodically snapshots every token's canonical record and pool state,
/// then prunes snapshots older than the retention window.
pub async fn run_snapshots(
    persistence: PostgresPersistence,
    platform: Arc<PlatformState>,
    interval_secs: u64,
    cleanup_after_days: u64,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    info!("snapshot task started, interval {interval_secs}s");
    loop {
        interval.tick().await;

        let summaries = platform.registry.list().await;
        let mut saved = 0usize;
        for summary in summaries {
            let Ok(entry_lock) = platform.registry.get(summary.token_address).await else {
                continue;
            };
            let entry = entry_lock.read().await;
            let metadata_json = match serde_json::to_value(&entry.meta) {
                Ok(value) => value,
                Err(e) => {
                    warn!("failed to serialize token {}: {e}", summary.token_address);
                    continue;
                }
            };
            let pool_json = serde_json::json!({
                "pool_address": entry.pool.address().to_string(),
                "token_reserve": entry.pool.token_reserve().to_string(),
                "native_reserve": entry.pool.native_reserve().to_string(),
                "spot_price": entry.pool.spot_price().to_string(),
                "trade_count": entry.history.len(),
            });
            drop(entry);

            let token = summary.token_address.to_string();
            match persistence
                .save_snapshot(&token, &metadata_json, &pool_json)
                .await
            {
                Ok(_) => saved += 1,
                Err(e) => warn!("failed to snapshot token {token}: {e}"),
            }
        }
        if saved > 0 {
            debug!("saved {saved} token snapshots");
        }

        if cleanup_after_days > 0 {
            match persistence.delete_old_snapshots(cleanup_after_days).await {
                Ok(deleted) if deleted > 0 => debug!("pruned {deleted} expired snapshots"),
                Ok(_) => {}
                Err(e) => warn!("snapshot cleanup failed: {e}"),
            }
        }
    }
}

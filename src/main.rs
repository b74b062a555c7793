//! launchpool server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints, and
//! optionally wires the PostgreSQL trade log and snapshot tasks.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use launchpool::api;
use launchpool::app_state::AppState;
use launchpool::config::GatewayConfig;
use launchpool::domain::{EventBus, PlatformState};
use launchpool::persistence::postgres::PostgresPersistence;
use launchpool::persistence::tasks;
use launchpool::service::{AdminService, ExchangeService, IssuanceService, QueryService};
use launchpool::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting launchpool");

    // Build domain layer
    let platform = Arc::new(PlatformState::new(
        config.admin_address,
        config.platform_fee,
    ));
    let event_bus = EventBus::new(config.event_bus_capacity);

    // The admin account collects issuance fees, so it must exist in the
    // ledger before the first token launch.
    platform.ledger.register(config.admin_address).await;
    tracing::info!(admin = %config.admin_address, fee = config.platform_fee, "platform initialized");

    // Build service layer
    let issuance_service = Arc::new(IssuanceService::new(Arc::clone(&platform), event_bus.clone()));
    let exchange_service = Arc::new(ExchangeService::new(Arc::clone(&platform), event_bus.clone()));
    let admin_service = Arc::new(AdminService::new(Arc::clone(&platform), event_bus.clone()));
    let query_service = Arc::new(QueryService::new(Arc::clone(&platform)));

    // Wire persistence when enabled; storage failures degrade to warnings
    // so the exchange keeps trading without a database.
    if config.persistence_enabled {
        match PostgresPersistence::connect(&config).await {
            Ok(persistence) => {
                match persistence.load_latest_snapshots().await {
                    Ok(snapshots) => tracing::info!(
                        count = snapshots.len(),
                        "loaded latest token snapshots from previous runs"
                    ),
                    Err(e) => tracing::warn!("failed to load snapshots: {e}"),
                }
                if config.event_log_enabled {
                    tokio::spawn(tasks::run_trade_log(
                        persistence.clone(),
                        event_bus.subscribe(),
                    ));
                }
                tokio::spawn(tasks::run_snapshots(
                    persistence,
                    Arc::clone(&platform),
                    config.snapshot_interval_secs,
                    config.cleanup_after_days,
                ));
            }
            Err(e) => {
                tracing::warn!("persistence disabled, database unavailable: {e}");
            }
        }
    }

    // Build application state
    let app_state = AppState {
        platform,
        issuance_service,
        exchange_service,
        admin_service,
        query_service,
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

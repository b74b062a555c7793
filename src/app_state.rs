//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::{EventBus, PlatformState};
use crate::service::{AdminService, ExchangeService, IssuanceService, QueryService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Platform-wide state shared by every service.
    pub platform: Arc<PlatformState>,
    /// Token issuance and account onboarding.
    pub issuance_service: Arc<IssuanceService>,
    /// Trade execution.
    pub exchange_service: Arc<ExchangeService>,
    /// Admin-gated mutations.
    pub admin_service: Arc<AdminService>,
    /// Read-only queries and quotes.
    pub query_service: Arc<QueryService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

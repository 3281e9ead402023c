use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create dashboard routes (authenticated)
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard/summary", get(handlers::get_summary))
        .route("/api/dashboard/stats", get(handlers::get_stats))
        .route("/api/dashboard/agents", get(handlers::get_agents))
        .route("/api/dashboard/villages", get(handlers::get_villages))
        .with_state(dashboard_service)
}

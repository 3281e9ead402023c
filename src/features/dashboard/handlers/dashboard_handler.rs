use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::auth::model::{AuthenticatedUser, BearerToken};
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::{ApiResponse, Meta};

// ============================================================================
// Summary
// ============================================================================

/// Get lightweight dashboard summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
    _user: AuthenticatedUser,
    token: BearerToken,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>, AppError> {
    let summary = service.get_summary(token.as_str()).await;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

// ============================================================================
// Period views
// ============================================================================

/// Full dashboard for a month or a whole year
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    params(DashboardQueryParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = ApiResponse<DashboardStatsDto>),
        (status = 400, description = "Invalid period"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_stats(
    State(service): State<Arc<DashboardService>>,
    _user: AuthenticatedUser,
    token: BearerToken,
    Query(params): Query<DashboardQueryParams>,
) -> Result<Json<ApiResponse<DashboardStatsDto>>, AppError> {
    let stats = service.get_stats(token.as_str(), &params).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Installations per agent
#[utoipa::path(
    get,
    path = "/api/dashboard/agents",
    tag = "Dashboard",
    params(DashboardQueryParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Agent rollup, busiest first", body = ApiResponse<Vec<AgentRollupDto>>),
        (status = 400, description = "Invalid period"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_agents(
    State(service): State<Arc<DashboardService>>,
    _user: AuthenticatedUser,
    token: BearerToken,
    Query(params): Query<DashboardQueryParams>,
) -> Result<Json<ApiResponse<Vec<AgentRollupDto>>>, AppError> {
    let rollup = service.get_agent_rollup(token.as_str(), &params).await?;
    let total = rollup.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(rollup),
        None,
        Some(Meta { total }),
    )))
}

/// Installations per village with month-over-month growth
#[utoipa::path(
    get,
    path = "/api/dashboard/villages",
    tag = "Dashboard",
    params(DashboardQueryParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Village rollup, busiest first", body = ApiResponse<Vec<VillageRollupDto>>),
        (status = 400, description = "Invalid period"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_villages(
    State(service): State<Arc<DashboardService>>,
    _user: AuthenticatedUser,
    token: BearerToken,
    Query(params): Query<DashboardQueryParams>,
) -> Result<Json<ApiResponse<Vec<VillageRollupDto>>>, AppError> {
    let rollup = service.get_village_rollup(token.as_str(), &params).await?;
    let total = rollup.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(rollup),
        None,
        Some(Meta { total }),
    )))
}

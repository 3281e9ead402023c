use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::agents::dtos::AgentRequestDto;
use crate::features::agents::models::Agent;
use crate::features::agents::services::AgentService;
use crate::features::auth::guards::RequireAdministrator;
use crate::features::auth::model::{AuthenticatedUser, BearerToken};
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    get,
    path = "/api/agents",
    responses(
        (status = 200, description = "All agents", body = ApiResponse<Vec<Agent>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "agents",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_agents(
    _user: AuthenticatedUser,
    token: BearerToken,
    State(service): State<Arc<AgentService>>,
) -> Result<Json<ApiResponse<Vec<Agent>>>> {
    let agents = service.list(token.as_str()).await;
    let total = agents.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(agents),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    post,
    path = "/api/agents",
    request_body = AgentRequestDto,
    responses(
        (status = 201, description = "Agent created"),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - administrator only"),
        (status = 409, description = "Agent already exists")
    ),
    tag = "agents",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_agent(
    RequireAdministrator(_user): RequireAdministrator,
    token: BearerToken,
    State(service): State<Arc<AgentService>>,
    AppJson(dto): AppJson<AgentRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<()>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.create(token.as_str(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            None,
            Some("Agen berhasil ditambahkan".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/agents/{id}",
    params(
        ("id" = String, Path, description = "Agent ID")
    ),
    request_body = AgentRequestDto,
    responses(
        (status = 200, description = "Agent updated"),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - administrator only"),
        (status = 404, description = "Agent not found")
    ),
    tag = "agents",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_agent(
    RequireAdministrator(_user): RequireAdministrator,
    token: BearerToken,
    State(service): State<Arc<AgentService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<AgentRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.update(token.as_str(), &id, dto).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/agents/{id}",
    params(
        ("id" = String, Path, description = "Agent ID")
    ),
    responses(
        (status = 200, description = "Agent deleted"),
        (status = 403, description = "Forbidden - administrator only"),
        (status = 404, description = "Agent not found"),
        (status = 409, description = "Agent still has customers")
    ),
    tag = "agents",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_agent(
    RequireAdministrator(_user): RequireAdministrator,
    token: BearerToken,
    State(service): State<Arc<AgentService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(token.as_str(), &id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

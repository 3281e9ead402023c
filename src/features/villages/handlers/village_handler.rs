use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdministrator;
use crate::features::auth::model::{AuthenticatedUser, BearerToken};
use crate::features::villages::dtos::VillageRequestDto;
use crate::features::villages::models::Village;
use crate::features::villages::services::VillageService;
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    get,
    path = "/api/villages",
    responses(
        (status = 200, description = "All villages", body = ApiResponse<Vec<Village>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "villages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_villages(
    _user: AuthenticatedUser,
    token: BearerToken,
    State(service): State<Arc<VillageService>>,
) -> Result<Json<ApiResponse<Vec<Village>>>> {
    let villages = service.list(token.as_str()).await;
    let total = villages.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(villages),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    post,
    path = "/api/villages",
    request_body = VillageRequestDto,
    responses(
        (status = 201, description = "Village created"),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - administrator only"),
        (status = 409, description = "Village already exists")
    ),
    tag = "villages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_village(
    RequireAdministrator(_user): RequireAdministrator,
    token: BearerToken,
    State(service): State<Arc<VillageService>>,
    AppJson(dto): AppJson<VillageRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<()>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.create(token.as_str(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            None,
            Some("Desa berhasil ditambahkan".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/villages/{id}",
    params(
        ("id" = String, Path, description = "Village ID")
    ),
    request_body = VillageRequestDto,
    responses(
        (status = 200, description = "Village updated"),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - administrator only"),
        (status = 404, description = "Village not found")
    ),
    tag = "villages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_village(
    RequireAdministrator(_user): RequireAdministrator,
    token: BearerToken,
    State(service): State<Arc<VillageService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<VillageRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.update(token.as_str(), &id, dto).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/villages/{id}",
    params(
        ("id" = String, Path, description = "Village ID")
    ),
    responses(
        (status = 200, description = "Village deleted"),
        (status = 403, description = "Forbidden - administrator only"),
        (status = 404, description = "Village not found"),
        (status = 409, description = "Village still referenced by customers")
    ),
    tag = "villages",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_village(
    RequireAdministrator(_user): RequireAdministrator,
    token: BearerToken,
    State(service): State<Arc<VillageService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(token.as_str(), &id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::{AuthenticatedUser, BearerToken};
use crate::features::installations::dtos::*;
use crate::features::installations::models::InstallationRecord;
use crate::features::installations::services::InstallationService;
use crate::shared::types::{ApiResponse, Meta};

/// List installations with filters and pagination
#[utoipa::path(
    get,
    path = "/api/installations",
    params(InstallationListQuery),
    responses(
        (status = 200, description = "Filtered installations", body = ApiResponse<Vec<InstallationRecord>>),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "installations",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_installations(
    _user: AuthenticatedUser,
    token: BearerToken,
    State(service): State<Arc<InstallationService>>,
    Query(query): Query<InstallationListQuery>,
) -> Result<Json<ApiResponse<Vec<InstallationRecord>>>> {
    let (records, total) = service.list(token.as_str(), &query).await?;
    Ok(Json(ApiResponse::success(
        Some(records),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/installations/{id}",
    params(
        ("id" = String, Path, description = "Installation ID")
    ),
    responses(
        (status = 200, description = "Installation detail", body = ApiResponse<InstallationRecord>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Installation not found")
    ),
    tag = "installations",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_installation(
    _user: AuthenticatedUser,
    token: BearerToken,
    State(service): State<Arc<InstallationService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<InstallationRecord>>> {
    let record = service.get(token.as_str(), &id).await?;
    Ok(Json(ApiResponse::success(Some(record), None, None)))
}

/// Register a new customer
#[utoipa::path(
    post,
    path = "/api/installations",
    request_body = CreateInstallationDto,
    responses(
        (status = 201, description = "Customer registered"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "installations",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_installation(
    _user: AuthenticatedUser,
    token: BearerToken,
    State(service): State<Arc<InstallationService>>,
    AppJson(dto): AppJson<CreateInstallationDto>,
) -> Result<(StatusCode, Json<ApiResponse<()>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.create(token.as_str(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            None,
            Some("Pelanggan berhasil didaftarkan".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/installations/{id}",
    params(
        ("id" = String, Path, description = "Installation ID")
    ),
    request_body = UpdateInstallationDto,
    responses(
        (status = 200, description = "Customer updated"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Installation not found")
    ),
    tag = "installations",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_installation(
    _user: AuthenticatedUser,
    token: BearerToken,
    State(service): State<Arc<InstallationService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateInstallationDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.update(token.as_str(), &id, dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Data pelanggan diperbarui".to_string()),
        None,
    )))
}

/// Confirm that the installation has been carried out
#[utoipa::path(
    post,
    path = "/api/installations/{id}/confirm",
    params(
        ("id" = String, Path, description = "Installation ID")
    ),
    request_body = ConfirmInstallationDto,
    responses(
        (status = 200, description = "Installation confirmed"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Installation not found"),
        (status = 409, description = "Already installed")
    ),
    tag = "installations",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn confirm_installation(
    user: AuthenticatedUser,
    token: BearerToken,
    State(service): State<Arc<InstallationService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<ConfirmInstallationDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::debug!("User {} confirming installation {}", user.user_id, id);
    service.confirm(token.as_str(), &id, dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Pemasangan dikonfirmasi".to_string()),
        None,
    )))
}

/// Mark the agent commission as paid or unpaid
#[utoipa::path(
    put,
    path = "/api/installations/{id}/commission",
    params(
        ("id" = String, Path, description = "Installation ID")
    ),
    request_body = CommissionDto,
    responses(
        (status = 200, description = "Commission updated"),
        (status = 404, description = "Installation not found"),
        (status = 409, description = "Installation not confirmed yet")
    ),
    tag = "installations",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_commission(
    _user: AuthenticatedUser,
    token: BearerToken,
    State(service): State<Arc<InstallationService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<CommissionDto>,
) -> Result<Json<ApiResponse<()>>> {
    service.set_commission(token.as_str(), &id, dto).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/installations/{id}",
    params(
        ("id" = String, Path, description = "Installation ID")
    ),
    responses(
        (status = 200, description = "Installation deleted"),
        (status = 404, description = "Installation not found")
    ),
    tag = "installations",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_installation(
    _user: AuthenticatedUser,
    token: BearerToken,
    State(service): State<Arc<InstallationService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(token.as_str(), &id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

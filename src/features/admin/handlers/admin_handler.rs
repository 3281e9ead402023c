use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::*;
use crate::features::admin::models::{ActivityLogEntry, User};
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdministrator;
use crate::features::auth::model::BearerToken;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List all accounts (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<User>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Administrator access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    RequireAdministrator(_user): RequireAdministrator,
    token: BearerToken,
    State(service): State<Arc<AdminService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<User>>>> {
    let (items, total) = service.list_users(token.as_str(), &params).await;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Administrator access required"),
        (status = 409, description = "Email already registered")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_user(
    RequireAdministrator(_user): RequireAdministrator,
    token: BearerToken,
    State(service): State<Arc<AdminService>>,
    AppJson(dto): AppJson<CreateUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<()>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.create_user(token.as_str(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            None,
            Some("User berhasil ditambahkan".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Administrator access required"),
        (status = 404, description = "User not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_user(
    RequireAdministrator(_user): RequireAdministrator,
    token: BearerToken,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.update_user(token.as_str(), &id, dto).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Cannot delete own account"),
        (status = 403, description = "Forbidden - Administrator access required"),
        (status = 404, description = "User not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_user(
    RequireAdministrator(user): RequireAdministrator,
    token: BearerToken,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_user(&user, token.as_str(), &id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Read the audit trail (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/activity-logs",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Activity log entries", body = ApiResponse<Vec<ActivityLogEntry>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Administrator access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_activity_logs(
    RequireAdministrator(_user): RequireAdministrator,
    token: BearerToken,
    State(service): State<Arc<AdminService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ActivityLogEntry>>>> {
    let (items, total) = service.list_activity_logs(token.as_str(), &params).await;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

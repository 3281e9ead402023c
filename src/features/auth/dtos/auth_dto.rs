use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::admin::models::User;
use crate::features::auth::model::{AuthenticatedUser, Role};

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// JWT access token issued by the record store
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    pub user: User,
}

/// DTO for /auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    pub is_administrator: bool,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            is_administrator: user.is_administrator(),
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

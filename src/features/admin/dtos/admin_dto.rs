use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::Role;

/// Request DTO for creating an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(
        length(min = 1, max = 128, message = "Nama wajib diisi"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,

    #[validate(email(message = "Email tidak valid"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password minimal 6 karakter"))]
    pub password: String,

    #[serde(default)]
    pub role: Role,

    #[validate(custom(function = "crate::shared::validation::validate_phone"))]
    pub phone: Option<String>,

    pub address: Option<String>,
}

/// Request DTO for replacing an account; omit `password` to keep the current one
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(
        length(min = 1, max = 128, message = "Nama wajib diisi"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,

    #[validate(email(message = "Email tidak valid"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password minimal 6 karakter"))]
    pub password: Option<String>,

    pub role: Role,

    #[validate(custom(function = "crate::shared::validation::validate_phone"))]
    pub phone: Option<String>,

    pub address: Option<String>,
}

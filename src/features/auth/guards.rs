//! Role-based authorization guards for the application.
//!
//! Two roles exist:
//! - Administrator: manages users, agents, villages and reads the activity log
//! - User: registers customers and confirms installations
//!
//! Plain authenticated access is expressed by extracting `AuthenticatedUser`
//! directly; only the administrator check needs a dedicated guard.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for checking if user is an administrator.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdministrator(user): RequireAdministrator) { ... }
/// ```
pub struct RequireAdministrator(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdministrator
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_administrator() {
            return Err(AppError::Forbidden(
                "Administrator access required".to_string(),
            ));
        }

        Ok(RequireAdministrator(user.clone()))
    }
}

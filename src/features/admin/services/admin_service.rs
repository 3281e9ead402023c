use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{CreateUserDto, UpdateUserDto};
use crate::features::admin::models::{ActivityLogEntry, User};
use crate::features::auth::model::AuthenticatedUser;
use crate::modules::record_store::{or_empty, RecordStore, UserPayload};
use crate::shared::types::PaginationQuery;
use crate::shared::validation::normalize_phone;

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Account management and audit log access for administrators
pub struct AdminService {
    store: Arc<dyn RecordStore>,
}

impl AdminService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn list_users(&self, token: &str, params: &PaginationQuery) -> (Vec<User>, i64) {
        let users = or_empty("user", self.store.list_users(token).await);
        let total = users.len() as i64;
        (params.page_of(&users), total)
    }

    pub async fn create_user(&self, token: &str, dto: CreateUserDto) -> Result<()> {
        let payload = UserPayload {
            name: dto.name.trim().to_string(),
            email: dto.email.trim().to_lowercase(),
            password: Some(dto.password),
            role: dto.role,
            phone: optional(dto.phone).map(|p| normalize_phone(&p)),
            address: optional(dto.address),
        };

        self.store.create_user(token, &payload).await?;
        tracing::info!("User {} created with role {}", payload.email, payload.role.as_str());
        Ok(())
    }

    pub async fn update_user(&self, token: &str, id: &str, dto: UpdateUserDto) -> Result<()> {
        let payload = UserPayload {
            name: dto.name.trim().to_string(),
            email: dto.email.trim().to_lowercase(),
            password: dto.password.filter(|p| !p.is_empty()),
            role: dto.role,
            phone: optional(dto.phone).map(|p| normalize_phone(&p)),
            address: optional(dto.address),
        };

        self.store.update_user(token, id, &payload).await?;
        Ok(())
    }

    /// Administrators cannot remove their own account
    pub async fn delete_user(&self, caller: &AuthenticatedUser, token: &str, id: &str) -> Result<()> {
        if caller.user_id == id {
            return Err(AppError::BadRequest(
                "Tidak dapat menghapus akun sendiri".to_string(),
            ));
        }

        self.store.delete_user(token, id).await?;
        tracing::info!("User {} deleted by {}", id, caller.user_id);
        Ok(())
    }

    // ========================================================================
    // Activity log
    // ========================================================================

    pub async fn list_activity_logs(
        &self,
        token: &str,
        params: &PaginationQuery,
    ) -> (Vec<ActivityLogEntry>, i64) {
        let logs = or_empty("activity log", self.store.list_activity_logs(token).await);
        let total = logs.len() as i64;
        (params.page_of(&logs), total)
    }
}

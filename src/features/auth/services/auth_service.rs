use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AuthResponseDto, LoginRequestDto};
use crate::modules::record_store::{LoginPayload, RecordStore, StoreError};

/// Service for authentication operations. Credentials are checked by the record store.
pub struct AuthService {
    store: Arc<dyn RecordStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let credentials = LoginPayload {
            email: dto.email.trim().to_lowercase(),
            password: dto.password,
        };

        let outcome = self.store.login(&credentials).await.map_err(|e| match e {
            StoreError::AuthRejected | StoreError::NotFound(_) => {
                tracing::warn!("Failed login for {}", credentials.email);
                AppError::Auth("Email atau password salah".to_string())
            }
            other => AppError::Store(other),
        })?;

        tracing::info!("User {} logged in", outcome.user.email);
        Ok(AuthResponseDto {
            access_token: outcome.token,
            token_type: "Bearer".to_string(),
            user: outcome.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::admin::models::User;
    use crate::features::auth::model::Role;
    use crate::modules::record_store::memory::{InMemoryRecordStore, MEMORY_PASSWORD};
    use tokio_test::assert_ok;

    fn service() -> AuthService {
        AuthService::new(Arc::new(InMemoryRecordStore::new().with_users(vec![User {
            id: "5".to_string(),
            name: "Sari".to_string(),
            email: "sari@example.com".to_string(),
            role: Role::Administrator,
            phone: None,
            address: None,
        }])))
    }

    #[tokio::test]
    async fn test_login_returns_store_token() {
        let response = assert_ok!(
            service()
                .login(LoginRequestDto {
                    email: " Sari@Example.com".to_string(),
                    password: MEMORY_PASSWORD.to_string(),
                })
                .await
        );
        assert_eq!(response.access_token, "memory-token-5");
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.user.role, Role::Administrator);
    }

    #[tokio::test]
    async fn test_wrong_password_is_auth_error() {
        let result = service()
            .login(LoginRequestDto {
                email: "sari@example.com".to_string(),
                password: "salah".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Auth(_))));
    }
}

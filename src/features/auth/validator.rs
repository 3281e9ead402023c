use super::model::{AuthenticatedUser, Role};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Verifies access tokens issued by the record store (HS256, shared secret)
pub struct JwtValidator {
    decoding_key: DecodingKey,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    // The store has used both "id" (numeric) and "sub" for the account id
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(rename = "exp")]
    _exp: u64,
}

impl JwtValidator {
    pub fn new(secret: String, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::HS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only HS256 is allowed",
                header.alg
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;
        validation.validate_aud = false;
        validation.validate_nbf = true;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?
            .claims;

        let user_id = match claims.id {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => claims.sub.filter(|s| !s.is_empty()),
        }
        .ok_or_else(|| AppError::Auth("Token carries no account id".to_string()))?;

        Ok(AuthenticatedUser {
            user_id,
            name: claims.name,
            email: claims.email,
            role: claims.role.as_deref().map(Role::parse).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{sign_claims, TEST_JWT_SECRET};
    use serde_json::json;

    fn validator() -> JwtValidator {
        JwtValidator::new(TEST_JWT_SECRET.to_string(), Duration::from_secs(0))
    }

    fn future_exp() -> u64 {
        (chrono::Utc::now().timestamp() + 3600) as u64
    }

    #[test]
    fn test_numeric_id_and_role() {
        let token = sign_claims(&json!({
            "id": 12,
            "name": "Sari",
            "email": "sari@example.com",
            "role": "Administrator",
            "exp": future_exp(),
        }));

        let user = validator().validate_token(&token).unwrap();
        assert_eq!(user.user_id, "12");
        assert_eq!(user.name.as_deref(), Some("Sari"));
        assert!(user.is_administrator());
    }

    #[test]
    fn test_sub_fallback_and_default_role() {
        let token = sign_claims(&json!({ "sub": "abc", "exp": future_exp() }));

        let user = validator().validate_token(&token).unwrap();
        assert_eq!(user.user_id, "abc");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = sign_claims(&json!({ "id": 1, "exp": 1_000_000u64 }));
        assert!(matches!(
            validator().validate_token(&token),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = sign_claims(&json!({ "id": 1, "exp": future_exp() }));
        let other = JwtValidator::new("another-secret".to_string(), Duration::from_secs(0));
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_missing_account_id_is_rejected() {
        let token = sign_claims(&json!({ "role": "User", "exp": future_exp() }));
        assert!(validator().validate_token(&token).is_err());
    }
}

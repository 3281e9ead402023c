#[cfg(test)]
use crate::features::auth::model::{AuthenticatedUser, BearerToken, Role};

#[cfg(test)]
use crate::features::installations::models::{InstallationDetails, InstallationRecord, InstallationStatus};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use chrono::NaiveDate;

#[cfg(test)]
pub const TEST_JWT_SECRET: &str = "test-secret-for-unit-tests";

#[cfg(test)]
pub const TEST_BEARER_TOKEN: &str = "test-bearer-token";

#[cfg(test)]
pub fn sign_claims(claims: &serde_json::Value) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("test token should encode")
}

#[cfg(test)]
pub fn sign_token(id: &str, role: &str) -> String {
    sign_claims(&serde_json::json!({
        "id": id,
        "role": role,
        "exp": chrono::Utc::now().timestamp() + 3600,
    }))
}

#[cfg(test)]
pub fn create_administrator() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: "1".to_string(),
        name: Some("Admin".to_string()),
        email: Some("admin@example.com".to_string()),
        role: Role::Administrator,
    }
}

#[cfg(test)]
pub fn create_operator() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: "2".to_string(),
        name: Some("Operator".to_string()),
        email: Some("operator@example.com".to_string()),
        role: Role::User,
    }
}

#[cfg(test)]
async fn inject_administrator_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_administrator());
    request
        .extensions_mut()
        .insert(BearerToken(TEST_BEARER_TOKEN.to_string()));
    next.run(request).await
}

#[cfg(test)]
async fn inject_operator_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_operator());
    request
        .extensions_mut()
        .insert(BearerToken(TEST_BEARER_TOKEN.to_string()));
    next.run(request).await
}

#[cfg(test)]
pub fn with_administrator_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_administrator_middleware))
}

#[cfg(test)]
pub fn with_operator_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_operator_middleware))
}

#[cfg(test)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Awaiting installation registered on the given date
#[cfg(test)]
pub fn awaiting(
    id: &str,
    agent: &str,
    village: &str,
    registered: Option<NaiveDate>,
) -> InstallationRecord {
    InstallationRecord {
        id: id.to_string(),
        name: format!("Pelanggan {}", id),
        phone: "08123456789".to_string(),
        address: format!("Jl. Mawar No. {}", id),
        village: village.to_string(),
        agent: agent.to_string(),
        registration_date: registered,
        status: InstallationStatus::Awaiting,
        installation: None,
        commission_paid: false,
    }
}

/// Installed record; installation happened the day after registration
#[cfg(test)]
pub fn installed(
    id: &str,
    agent: &str,
    village: &str,
    registered: Option<NaiveDate>,
) -> InstallationRecord {
    InstallationRecord {
        status: InstallationStatus::Installed,
        installation: Some(InstallationDetails {
            date: registered.and_then(|d| d.succ_opt()),
            time: Some("10:00".to_string()),
            technician: Some("Budi".to_string()),
            notes: None,
        }),
        ..awaiting(id, agent, village, registered)
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ROLE_ADMINISTRATOR, ROLE_USER};

/// Account role as issued by the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[default]
    User,
    Administrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Administrator => ROLE_ADMINISTRATOR,
        }
    }

    /// Lenient parse; anything that is not recognisably an administrator is a plain user
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "administrator" | "admin" => Role::Administrator,
            _ => Role::User,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Check if user may manage accounts and reference data
    pub fn is_administrator(&self) -> bool {
        self.role == Role::Administrator
    }
}

/// Raw bearer token of the current request, forwarded to the record store
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::auth::model::Role;

/// Account as exposed by the record store. Password hashes never leave the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
}

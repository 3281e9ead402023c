use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sales agent ("agen") credited with acquiring customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

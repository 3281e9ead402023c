use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Village ("desa") where customers live, with its district and regency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Village {
    pub id: String,
    pub name: String,
    /// District
    pub kecamatan: Option<String>,
    /// Regency
    pub kabupaten: Option<String>,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Append-only audit entry written by the record store on mutating actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogEntry {
    pub id: String,
    /// Timestamp exactly as the store reports it
    pub timestamp: Option<String>,
    pub user_name: Option<String>,
    pub activity: String,
    pub details: Option<String>,
    pub ip_address: Option<String>,
}

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use super::error::StoreResult;
use crate::features::admin::models::{ActivityLogEntry, User};
use crate::features::agents::models::Agent;
use crate::features::auth::model::Role;
use crate::features::installations::models::{InstallationRecord, InstallationStatus};
use crate::features::villages::models::Village;

// Outgoing payloads use the store's own (Indonesian) column names.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewInstallation {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "no_hp")]
    pub phone: String,
    #[serde(rename = "alamat")]
    pub address: String,
    #[serde(rename = "desa")]
    pub village: String,
    #[serde(rename = "agen")]
    pub agent: String,
    #[serde(rename = "tanggal_daftar")]
    pub registration_date: NaiveDate,
    pub status: InstallationStatus,
    #[serde(rename = "komisi_dibayar")]
    pub commission_paid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstallationUpdate {
    #[serde(rename = "nama", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "no_hp", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "alamat", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "desa", skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(rename = "agen", skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

impl InstallationUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Transition to `terpasang`; commission starts unpaid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstallationConfirmation {
    pub status: InstallationStatus,
    #[serde(rename = "tanggal_pasang")]
    pub installation_date: NaiveDate,
    #[serde(rename = "jam_pasang", skip_serializing_if = "Option::is_none")]
    pub installation_time: Option<String>,
    #[serde(rename = "teknisi")]
    pub technician: String,
    #[serde(rename = "catatan", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "komisi_dibayar")]
    pub commission_paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionUpdate {
    #[serde(rename = "komisi_dibayar")]
    pub commission_paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentPayload {
    #[serde(rename = "nama_agen")]
    pub name: String,
    #[serde(rename = "no_hp", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "alamat", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VillagePayload {
    #[serde(rename = "nama_desa")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kecamatan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kabupaten: Option<String>,
}

/// Account create/update. A `None` password leaves the stored one unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPayload {
    #[serde(rename = "nama")]
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    #[serde(rename = "no_hp", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "alamat", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Typed access to the external record store.
///
/// Every operation carries the caller's bearer token; the store enforces its
/// own authorization in addition to the role guards of this service.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn login(&self, credentials: &LoginPayload) -> StoreResult<LoginOutcome>;

    async fn list_installations(&self, token: &str) -> StoreResult<Vec<InstallationRecord>>;
    async fn get_installation(&self, token: &str, id: &str) -> StoreResult<InstallationRecord>;
    async fn create_installation(&self, token: &str, payload: &NewInstallation) -> StoreResult<()>;
    async fn update_installation(
        &self,
        token: &str,
        id: &str,
        payload: &InstallationUpdate,
    ) -> StoreResult<()>;
    async fn confirm_installation(
        &self,
        token: &str,
        id: &str,
        payload: &InstallationConfirmation,
    ) -> StoreResult<()>;
    async fn set_commission(
        &self,
        token: &str,
        id: &str,
        payload: &CommissionUpdate,
    ) -> StoreResult<()>;
    async fn delete_installation(&self, token: &str, id: &str) -> StoreResult<()>;

    async fn list_agents(&self, token: &str) -> StoreResult<Vec<Agent>>;
    async fn create_agent(&self, token: &str, payload: &AgentPayload) -> StoreResult<()>;
    async fn update_agent(&self, token: &str, id: &str, payload: &AgentPayload) -> StoreResult<()>;
    async fn delete_agent(&self, token: &str, id: &str) -> StoreResult<()>;

    async fn list_villages(&self, token: &str) -> StoreResult<Vec<Village>>;
    async fn create_village(&self, token: &str, payload: &VillagePayload) -> StoreResult<()>;
    async fn update_village(
        &self,
        token: &str,
        id: &str,
        payload: &VillagePayload,
    ) -> StoreResult<()>;
    async fn delete_village(&self, token: &str, id: &str) -> StoreResult<()>;

    async fn list_users(&self, token: &str) -> StoreResult<Vec<User>>;
    async fn create_user(&self, token: &str, payload: &UserPayload) -> StoreResult<()>;
    async fn update_user(&self, token: &str, id: &str, payload: &UserPayload) -> StoreResult<()>;
    async fn delete_user(&self, token: &str, id: &str) -> StoreResult<()>;

    async fn list_activity_logs(&self, token: &str) -> StoreResult<Vec<ActivityLogEntry>>;
}

/// Read-side fallback: any failure to list becomes an empty list.
///
/// Views stay usable (if empty) when the store is down or rejects the token.
pub fn or_empty<T>(what: &str, result: StoreResult<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Falling back to empty {} list: {}", what, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::record_store::StoreError;
    use serde_json::json;

    #[test]
    fn test_or_empty_swallows_failures() {
        let failed: StoreResult<Vec<Agent>> = Err(StoreError::AuthRejected);
        assert!(or_empty("agent", failed).is_empty());

        let ok: StoreResult<Vec<i32>> = Ok(vec![1, 2]);
        assert_eq!(or_empty("number", ok), vec![1, 2]);
    }

    #[test]
    fn test_new_installation_uses_store_field_names() {
        let payload = NewInstallation {
            name: "Rina".to_string(),
            phone: "08123456789".to_string(),
            address: "Jl. Melati 3".to_string(),
            village: "Sukamaju".to_string(),
            agent: "YOGA".to_string(),
            registration_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            status: InstallationStatus::Awaiting,
            commission_paid: false,
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "nama": "Rina",
                "no_hp": "08123456789",
                "alamat": "Jl. Melati 3",
                "desa": "Sukamaju",
                "agen": "YOGA",
                "tanggal_daftar": "2024-06-01",
                "status": "menunggu",
                "komisi_dibayar": false,
            })
        );
    }

    #[test]
    fn test_partial_update_skips_missing_fields() {
        let update = InstallationUpdate {
            phone: Some("081299998888".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "no_hp": "081299998888" })
        );
        assert!(InstallationUpdate::default().is_empty());
    }
}

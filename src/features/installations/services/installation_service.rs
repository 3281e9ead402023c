use chrono::Local;
use std::sync::Arc;

use super::filter::{self, InstallationFilter};
use crate::core::error::{AppError, Result};
use crate::features::installations::dtos::*;
use crate::features::installations::models::{InstallationRecord, InstallationStatus};
use crate::modules::record_store::{
    or_empty, CommissionUpdate, InstallationConfirmation, InstallationUpdate, NewInstallation,
    RecordStore,
};
use crate::shared::validation::normalize_phone;

fn clean(value: &str) -> String {
    value.trim().to_string()
}

/// Customer registration and installation lifecycle
pub struct InstallationService {
    store: Arc<dyn RecordStore>,
}

impl InstallationService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Filtered page of installations plus the filtered total.
    /// A failing store read yields an empty page.
    pub async fn list(
        &self,
        token: &str,
        query: &InstallationListQuery,
    ) -> Result<(Vec<InstallationRecord>, i64)> {
        let criteria = InstallationFilter::from_query(query)?;
        let records = or_empty("installation", self.store.list_installations(token).await);

        let visible: Vec<InstallationRecord> = filter::filter(&records, &criteria)
            .into_iter()
            .cloned()
            .collect();
        let total = visible.len() as i64;

        Ok((query.pagination().page_of(&visible), total))
    }

    pub async fn get(&self, token: &str, id: &str) -> Result<InstallationRecord> {
        Ok(self.store.get_installation(token, id).await?)
    }

    pub async fn create(&self, token: &str, dto: CreateInstallationDto) -> Result<()> {
        let payload = NewInstallation {
            name: clean(&dto.name),
            phone: normalize_phone(&dto.phone),
            address: clean(&dto.address),
            village: clean(&dto.village),
            agent: clean(&dto.agent),
            registration_date: dto
                .registration_date
                .unwrap_or_else(|| Local::now().date_naive()),
            status: InstallationStatus::Awaiting,
            commission_paid: false,
        };

        self.store.create_installation(token, &payload).await?;
        tracing::info!("Registered customer {} via agent {}", payload.name, payload.agent);
        Ok(())
    }

    pub async fn update(&self, token: &str, id: &str, dto: UpdateInstallationDto) -> Result<()> {
        let payload = InstallationUpdate {
            name: dto.name.as_deref().map(clean),
            phone: dto.phone.as_deref().map(normalize_phone),
            address: dto.address.as_deref().map(clean),
            village: dto.village.as_deref().map(clean),
            agent: dto.agent.as_deref().map(clean),
        };
        if payload.is_empty() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }

        self.store.update_installation(token, id, &payload).await?;
        Ok(())
    }

    /// Move an awaiting customer to `terpasang` with an unpaid commission
    pub async fn confirm(&self, token: &str, id: &str, dto: ConfirmInstallationDto) -> Result<()> {
        let record = self.store.get_installation(token, id).await?;
        if record.is_installed() {
            return Err(AppError::Conflict(format!(
                "Pelanggan {} sudah terpasang",
                record.name
            )));
        }

        let payload = InstallationConfirmation {
            status: InstallationStatus::Installed,
            installation_date: dto.installation_date,
            installation_time: dto.installation_time.as_deref().map(clean),
            technician: clean(&dto.technician),
            notes: dto.notes.as_deref().map(clean).filter(|n| !n.is_empty()),
            commission_paid: false,
        };

        self.store.confirm_installation(token, id, &payload).await?;
        tracing::info!("Installation {} confirmed by {}", id, payload.technician);
        Ok(())
    }

    pub async fn set_commission(&self, token: &str, id: &str, dto: CommissionDto) -> Result<()> {
        let record = self.store.get_installation(token, id).await?;
        if !record.is_installed() {
            return Err(AppError::Conflict(format!(
                "Komisi hanya untuk pelanggan terpasang ({} masih {})",
                record.name,
                record.status.as_str()
            )));
        }

        let payload = CommissionUpdate {
            commission_paid: dto.commission_paid,
        };
        self.store.set_commission(token, id, &payload).await?;
        Ok(())
    }

    pub async fn delete(&self, token: &str, id: &str) -> Result<()> {
        self.store.delete_installation(token, id).await?;
        tracing::info!("Deleted installation {}", id);
        Ok(())
    }
}

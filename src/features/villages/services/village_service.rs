use std::sync::Arc;

use crate::core::error::Result;
use crate::features::villages::dtos::VillageRequestDto;
use crate::features::villages::models::Village;
use crate::modules::record_store::{or_empty, RecordStore, VillagePayload};

impl From<VillageRequestDto> for VillagePayload {
    fn from(dto: VillageRequestDto) -> Self {
        let trimmed = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            name: dto.name.trim().to_string(),
            kecamatan: trimmed(dto.kecamatan),
            kabupaten: trimmed(dto.kabupaten),
        }
    }
}

pub struct VillageService {
    store: Arc<dyn RecordStore>,
}

impl VillageService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, token: &str) -> Vec<Village> {
        or_empty("village", self.store.list_villages(token).await)
    }

    pub async fn create(&self, token: &str, dto: VillageRequestDto) -> Result<()> {
        let payload = VillagePayload::from(dto);
        self.store.create_village(token, &payload).await?;
        tracing::info!("Village {} created", payload.name);
        Ok(())
    }

    pub async fn update(&self, token: &str, id: &str, dto: VillageRequestDto) -> Result<()> {
        self.store
            .update_village(token, id, &VillagePayload::from(dto))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, token: &str, id: &str) -> Result<()> {
        self.store.delete_village(token, id).await?;
        tracing::info!("Village {} deleted", id);
        Ok(())
    }
}

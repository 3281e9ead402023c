use std::sync::Arc;

use crate::core::error::Result;
use crate::features::agents::dtos::AgentRequestDto;
use crate::features::agents::models::Agent;
use crate::modules::record_store::{or_empty, AgentPayload, RecordStore};
use crate::shared::validation::normalize_phone;

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<AgentRequestDto> for AgentPayload {
    fn from(dto: AgentRequestDto) -> Self {
        Self {
            name: dto.name.trim().to_uppercase(),
            phone: non_empty(dto.phone).map(|p| normalize_phone(&p)),
            email: non_empty(dto.email),
            address: non_empty(dto.address),
        }
    }
}

pub struct AgentService {
    store: Arc<dyn RecordStore>,
}

impl AgentService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Every agent; empty when the store cannot be read
    pub async fn list(&self, token: &str) -> Vec<Agent> {
        or_empty("agent", self.store.list_agents(token).await)
    }

    pub async fn create(&self, token: &str, dto: AgentRequestDto) -> Result<()> {
        let payload = AgentPayload::from(dto);
        self.store.create_agent(token, &payload).await?;
        tracing::info!("Agent {} created", payload.name);
        Ok(())
    }

    pub async fn update(&self, token: &str, id: &str, dto: AgentRequestDto) -> Result<()> {
        self.store
            .update_agent(token, id, &AgentPayload::from(dto))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, token: &str, id: &str) -> Result<()> {
        self.store.delete_agent(token, id).await?;
        tracing::info!("Agent {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_upper_cases_name() {
        let payload = AgentPayload::from(AgentRequestDto {
            name: "  yoga pratama ".to_string(),
            phone: Some("0812 3456 789".to_string()),
            email: Some(" ".to_string()),
            address: None,
        });
        assert_eq!(payload.name, "YOGA PRATAMA");
        assert_eq!(payload.phone.as_deref(), Some("08123456789"));
        assert_eq!(payload.email, None);
    }
}

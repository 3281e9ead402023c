use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::client::{
    AgentPayload, CommissionUpdate, InstallationConfirmation, InstallationUpdate, LoginOutcome,
    LoginPayload, NewInstallation, RecordStore, UserPayload, VillagePayload,
};
use super::error::{StoreError, StoreResult};
use crate::features::admin::models::{ActivityLogEntry, User};
use crate::features::agents::models::Agent;
use crate::features::installations::models::{InstallationDetails, InstallationRecord};
use crate::features::villages::models::Village;

pub const MEMORY_PASSWORD: &str = "rahasia123";

/// In-process record store for handler and service tests
#[derive(Default)]
pub struct InMemoryRecordStore {
    installations: Mutex<Vec<InstallationRecord>>,
    agents: Mutex<Vec<Agent>>,
    villages: Mutex<Vec<Village>>,
    users: Mutex<Vec<User>>,
    logs: Mutex<Vec<ActivityLogEntry>>,
    reject_token: bool,
    writes: AtomicUsize,
    next_id: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1000),
            ..Default::default()
        }
    }

    pub fn with_installations(self, records: Vec<InstallationRecord>) -> Self {
        *self.installations.lock().unwrap() = records;
        self
    }

    pub fn with_agents(self, agents: Vec<Agent>) -> Self {
        *self.agents.lock().unwrap() = agents;
        self
    }

    pub fn with_villages(self, villages: Vec<Village>) -> Self {
        *self.villages.lock().unwrap() = villages;
        self
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        *self.users.lock().unwrap() = users;
        self
    }

    pub fn with_logs(self, logs: Vec<ActivityLogEntry>) -> Self {
        *self.logs.lock().unwrap() = logs;
        self
    }

    /// Behave like a store that answers 401 to every call
    pub fn rejecting_token(mut self) -> Self {
        self.reject_token = true;
        self
    }

    /// Number of mutating calls received
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn installations(&self) -> Vec<InstallationRecord> {
        self.installations.lock().unwrap().clone()
    }

    pub fn agents(&self) -> Vec<Agent> {
        self.agents.lock().unwrap().clone()
    }

    pub fn villages(&self) -> Vec<Village> {
        self.villages.lock().unwrap().clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn check(&self) -> StoreResult<()> {
        if self.reject_token {
            Err(StoreError::AuthRejected)
        } else {
            Ok(())
        }
    }

    fn write(&self) -> StoreResult<String> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst).to_string())
    }

    fn with_installation<F>(&self, id: &str, apply: F) -> StoreResult<()>
    where
        F: FnOnce(&mut InstallationRecord),
    {
        let mut records = self.installations.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("Pelanggan {} tidak ditemukan", id)))?;
        apply(record);
        Ok(())
    }

    fn remove_where<T>(
        items: &Mutex<Vec<T>>,
        id: &str,
        matches: impl Fn(&T) -> bool,
    ) -> StoreResult<()> {
        let mut items = items.lock().unwrap();
        let before = items.len();
        items.retain(|item| !matches(item));
        if items.len() == before {
            return Err(StoreError::NotFound(format!("Data {} tidak ditemukan", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn login(&self, credentials: &LoginPayload) -> StoreResult<LoginOutcome> {
        let users = self.users.lock().unwrap();
        users
            .iter()
            .find(|u| u.email == credentials.email && credentials.password == MEMORY_PASSWORD)
            .map(|user| LoginOutcome {
                token: format!("memory-token-{}", user.id),
                user: user.clone(),
            })
            .ok_or(StoreError::AuthRejected)
    }

    async fn list_installations(&self, _token: &str) -> StoreResult<Vec<InstallationRecord>> {
        self.check()?;
        Ok(self.installations())
    }

    async fn get_installation(&self, _token: &str, id: &str) -> StoreResult<InstallationRecord> {
        self.check()?;
        self.installations()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("Pelanggan {} tidak ditemukan", id)))
    }

    async fn create_installation(&self, _token: &str, payload: &NewInstallation) -> StoreResult<()> {
        let id = self.write()?;
        self.installations.lock().unwrap().push(InstallationRecord {
            id,
            name: payload.name.clone(),
            phone: payload.phone.clone(),
            address: payload.address.clone(),
            village: payload.village.clone(),
            agent: payload.agent.clone(),
            registration_date: Some(payload.registration_date),
            status: payload.status,
            installation: None,
            commission_paid: payload.commission_paid,
        });
        Ok(())
    }

    async fn update_installation(
        &self,
        _token: &str,
        id: &str,
        payload: &InstallationUpdate,
    ) -> StoreResult<()> {
        self.write()?;
        self.with_installation(id, |record| {
            if let Some(name) = &payload.name {
                record.name = name.clone();
            }
            if let Some(phone) = &payload.phone {
                record.phone = phone.clone();
            }
            if let Some(address) = &payload.address {
                record.address = address.clone();
            }
            if let Some(village) = &payload.village {
                record.village = village.clone();
            }
            if let Some(agent) = &payload.agent {
                record.agent = agent.clone();
            }
        })
    }

    async fn confirm_installation(
        &self,
        _token: &str,
        id: &str,
        payload: &InstallationConfirmation,
    ) -> StoreResult<()> {
        self.write()?;
        self.with_installation(id, |record| {
            record.status = payload.status;
            record.commission_paid = payload.commission_paid;
            record.installation = Some(InstallationDetails {
                date: Some(payload.installation_date),
                time: payload.installation_time.clone(),
                technician: Some(payload.technician.clone()),
                notes: payload.notes.clone(),
            });
        })
    }

    async fn set_commission(
        &self,
        _token: &str,
        id: &str,
        payload: &CommissionUpdate,
    ) -> StoreResult<()> {
        self.write()?;
        self.with_installation(id, |record| record.commission_paid = payload.commission_paid)
    }

    async fn delete_installation(&self, _token: &str, id: &str) -> StoreResult<()> {
        self.write()?;
        Self::remove_where(&self.installations, id, |r| r.id == id)
    }

    async fn list_agents(&self, _token: &str) -> StoreResult<Vec<Agent>> {
        self.check()?;
        Ok(self.agents())
    }

    async fn create_agent(&self, _token: &str, payload: &AgentPayload) -> StoreResult<()> {
        let id = self.write()?;
        let mut agents = self.agents.lock().unwrap();
        if agents.iter().any(|a| a.name == payload.name) {
            return Err(StoreError::Conflict(format!(
                "Agen {} sudah terdaftar",
                payload.name
            )));
        }
        agents.push(Agent {
            id,
            name: payload.name.clone(),
            phone: payload.phone.clone(),
            email: payload.email.clone(),
            address: payload.address.clone(),
        });
        Ok(())
    }

    async fn update_agent(&self, _token: &str, id: &str, payload: &AgentPayload) -> StoreResult<()> {
        self.write()?;
        let mut agents = self.agents.lock().unwrap();
        let agent = agents
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("Agen {} tidak ditemukan", id)))?;
        agent.name = payload.name.clone();
        agent.phone = payload.phone.clone();
        agent.email = payload.email.clone();
        agent.address = payload.address.clone();
        Ok(())
    }

    async fn delete_agent(&self, _token: &str, id: &str) -> StoreResult<()> {
        self.write()?;
        // Mirrors the store's referential policy
        let name = self
            .agents()
            .into_iter()
            .find(|a| a.id == id)
            .map(|a| a.name)
            .unwrap_or_default();
        if self.installations().iter().any(|r| r.agent == name) {
            return Err(StoreError::Conflict(
                "Agen masih memiliki pelanggan".to_string(),
            ));
        }
        Self::remove_where(&self.agents, id, |a| a.id == id)
    }

    async fn list_villages(&self, _token: &str) -> StoreResult<Vec<Village>> {
        self.check()?;
        Ok(self.villages())
    }

    async fn create_village(&self, _token: &str, payload: &VillagePayload) -> StoreResult<()> {
        let id = self.write()?;
        self.villages.lock().unwrap().push(Village {
            id,
            name: payload.name.clone(),
            kecamatan: payload.kecamatan.clone(),
            kabupaten: payload.kabupaten.clone(),
        });
        Ok(())
    }

    async fn update_village(
        &self,
        _token: &str,
        id: &str,
        payload: &VillagePayload,
    ) -> StoreResult<()> {
        self.write()?;
        let mut villages = self.villages.lock().unwrap();
        let village = villages
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("Desa {} tidak ditemukan", id)))?;
        village.name = payload.name.clone();
        village.kecamatan = payload.kecamatan.clone();
        village.kabupaten = payload.kabupaten.clone();
        Ok(())
    }

    async fn delete_village(&self, _token: &str, id: &str) -> StoreResult<()> {
        self.write()?;
        Self::remove_where(&self.villages, id, |v| v.id == id)
    }

    async fn list_users(&self, _token: &str) -> StoreResult<Vec<User>> {
        self.check()?;
        Ok(self.users())
    }

    async fn create_user(&self, _token: &str, payload: &UserPayload) -> StoreResult<()> {
        let id = self.write()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == payload.email) {
            return Err(StoreError::Conflict("Email sudah terdaftar".to_string()));
        }
        users.push(User {
            id,
            name: payload.name.clone(),
            email: payload.email.clone(),
            role: payload.role,
            phone: payload.phone.clone(),
            address: payload.address.clone(),
        });
        Ok(())
    }

    async fn update_user(&self, _token: &str, id: &str, payload: &UserPayload) -> StoreResult<()> {
        self.write()?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("User {} tidak ditemukan", id)))?;
        user.name = payload.name.clone();
        user.email = payload.email.clone();
        user.role = payload.role;
        user.phone = payload.phone.clone();
        user.address = payload.address.clone();
        Ok(())
    }

    async fn delete_user(&self, _token: &str, id: &str) -> StoreResult<()> {
        self.write()?;
        Self::remove_where(&self.users, id, |u| u.id == id)
    }

    async fn list_activity_logs(&self, _token: &str) -> StoreResult<Vec<ActivityLogEntry>> {
        self.check()?;
        Ok(self.logs.lock().unwrap().clone())
    }
}

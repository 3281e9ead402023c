use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;

use super::client::{
    AgentPayload, CommissionUpdate, InstallationConfirmation, InstallationUpdate, LoginOutcome,
    LoginPayload, NewInstallation, RecordStore, UserPayload, VillagePayload,
};
use super::error::{StoreError, StoreResult};
use super::ingest;
use crate::core::config::RecordStoreConfig;
use crate::features::admin::models::{ActivityLogEntry, User};
use crate::features::agents::models::Agent;
use crate::features::installations::models::InstallationRecord;
use crate::features::villages::models::Village;

const LOGIN_PATH: &str = "/api/login";
const INSTALLATIONS_PATH: &str = "/api/pelanggan";
const AGENTS_PATH: &str = "/api/agen";
const VILLAGES_PATH: &str = "/api/desa";
const USERS_PATH: &str = "/api/users";
const ACTIVITY_LOGS_PATH: &str = "/api/logs";

/// REST client for the record store
pub struct HttpRecordStore {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpRecordStore {
    pub fn new(config: &RecordStoreConfig) -> StoreResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn item_url(&self, path: &str, id: &str) -> String {
        format!("{}{}/{}", self.base_url, path, urlencoding::encode(id))
    }

    /// Send a request and turn non-2xx answers into the error taxonomy
    async fn execute(&self, request: RequestBuilder) -> StoreResult<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Record store request failed: {}", e);
            StoreError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("Record store answered HTTP {}: {}", status, body);
        Err(StoreError::from_status(status.as_u16(), &body))
    }

    async fn get_json(&self, token: &str, url: &str) -> StoreResult<Value> {
        tracing::debug!("Fetching from record store: {}", url);

        self.execute(self.http_client.get(url).bearer_auth(token))
            .await?
            .json::<Value>()
            .await
            .map_err(|e| StoreError::MalformedResponse(format!("Invalid JSON body: {}", e)))
    }

    async fn fetch_list(&self, token: &str, path: &str) -> StoreResult<Vec<Value>> {
        let payload = self.get_json(token, &self.collection_url(path)).await?;
        ingest::array(payload)
    }

    async fn send_json<P: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        token: &str,
        url: &str,
        payload: &P,
    ) -> StoreResult<()> {
        tracing::debug!("Sending {} {}", method, url);

        self.execute(
            self.http_client
                .request(method, url)
                .bearer_auth(token)
                .json(payload),
        )
        .await?;
        Ok(())
    }

    async fn remove(&self, token: &str, path: &str, id: &str) -> StoreResult<()> {
        let url = self.item_url(path, id);
        tracing::debug!("Deleting {}", url);

        self.execute(self.http_client.delete(&url).bearer_auth(token))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn login(&self, credentials: &LoginPayload) -> StoreResult<LoginOutcome> {
        let payload = self
            .execute(
                self.http_client
                    .post(self.collection_url(LOGIN_PATH))
                    .json(credentials),
            )
            .await?
            .json::<Value>()
            .await
            .map_err(|e| StoreError::MalformedResponse(format!("Invalid login body: {}", e)))?;

        ingest::login(&payload)
    }

    async fn list_installations(&self, token: &str) -> StoreResult<Vec<InstallationRecord>> {
        let items = self.fetch_list(token, INSTALLATIONS_PATH).await?;
        Ok(ingest::installations(&items))
    }

    async fn get_installation(&self, token: &str, id: &str) -> StoreResult<InstallationRecord> {
        let payload = self
            .get_json(token, &self.item_url(INSTALLATIONS_PATH, id))
            .await?;
        ingest::single_installation(&payload)
    }

    async fn create_installation(&self, token: &str, payload: &NewInstallation) -> StoreResult<()> {
        self.send_json(
            Method::POST,
            token,
            &self.collection_url(INSTALLATIONS_PATH),
            payload,
        )
        .await
    }

    async fn update_installation(
        &self,
        token: &str,
        id: &str,
        payload: &InstallationUpdate,
    ) -> StoreResult<()> {
        self.send_json(
            Method::PUT,
            token,
            &self.item_url(INSTALLATIONS_PATH, id),
            payload,
        )
        .await
    }

    async fn confirm_installation(
        &self,
        token: &str,
        id: &str,
        payload: &InstallationConfirmation,
    ) -> StoreResult<()> {
        self.send_json(
            Method::PUT,
            token,
            &self.item_url(INSTALLATIONS_PATH, id),
            payload,
        )
        .await
    }

    async fn set_commission(
        &self,
        token: &str,
        id: &str,
        payload: &CommissionUpdate,
    ) -> StoreResult<()> {
        self.send_json(
            Method::PUT,
            token,
            &self.item_url(INSTALLATIONS_PATH, id),
            payload,
        )
        .await
    }

    async fn delete_installation(&self, token: &str, id: &str) -> StoreResult<()> {
        self.remove(token, INSTALLATIONS_PATH, id).await
    }

    async fn list_agents(&self, token: &str) -> StoreResult<Vec<Agent>> {
        let items = self.fetch_list(token, AGENTS_PATH).await?;
        Ok(ingest::agents(&items))
    }

    async fn create_agent(&self, token: &str, payload: &AgentPayload) -> StoreResult<()> {
        self.send_json(Method::POST, token, &self.collection_url(AGENTS_PATH), payload)
            .await
    }

    async fn update_agent(&self, token: &str, id: &str, payload: &AgentPayload) -> StoreResult<()> {
        self.send_json(Method::PUT, token, &self.item_url(AGENTS_PATH, id), payload)
            .await
    }

    async fn delete_agent(&self, token: &str, id: &str) -> StoreResult<()> {
        self.remove(token, AGENTS_PATH, id).await
    }

    async fn list_villages(&self, token: &str) -> StoreResult<Vec<Village>> {
        let items = self.fetch_list(token, VILLAGES_PATH).await?;
        Ok(ingest::villages(&items))
    }

    async fn create_village(&self, token: &str, payload: &VillagePayload) -> StoreResult<()> {
        self.send_json(Method::POST, token, &self.collection_url(VILLAGES_PATH), payload)
            .await
    }

    async fn update_village(
        &self,
        token: &str,
        id: &str,
        payload: &VillagePayload,
    ) -> StoreResult<()> {
        self.send_json(Method::PUT, token, &self.item_url(VILLAGES_PATH, id), payload)
            .await
    }

    async fn delete_village(&self, token: &str, id: &str) -> StoreResult<()> {
        self.remove(token, VILLAGES_PATH, id).await
    }

    async fn list_users(&self, token: &str) -> StoreResult<Vec<User>> {
        let items = self.fetch_list(token, USERS_PATH).await?;
        Ok(ingest::users(&items))
    }

    async fn create_user(&self, token: &str, payload: &UserPayload) -> StoreResult<()> {
        self.send_json(Method::POST, token, &self.collection_url(USERS_PATH), payload)
            .await
    }

    async fn update_user(&self, token: &str, id: &str, payload: &UserPayload) -> StoreResult<()> {
        self.send_json(Method::PUT, token, &self.item_url(USERS_PATH, id), payload)
            .await
    }

    async fn delete_user(&self, token: &str, id: &str) -> StoreResult<()> {
        self.remove(token, USERS_PATH, id).await
    }

    async fn list_activity_logs(&self, token: &str) -> StoreResult<Vec<ActivityLogEntry>> {
        let items = self.fetch_list(token, ACTIVITY_LOGS_PATH).await?;
        Ok(ingest::activity_logs(&items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn store(base_url: &str) -> HttpRecordStore {
        HttpRecordStore::new(&RecordStoreConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn test_urls_are_built_from_base() {
        let store = store("http://store.local:5000/");
        assert_eq!(store.base_url(), "http://store.local:5000");
        assert_eq!(
            store.collection_url(INSTALLATIONS_PATH),
            "http://store.local:5000/api/pelanggan"
        );
        assert_eq!(
            store.item_url(AGENTS_PATH, "a b/1"),
            "http://store.local:5000/api/agen/a%20b%2F1"
        );
    }

    #[tokio::test]
    async fn test_unreachable_store_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let store = store("http://127.0.0.1:9");
        let result = store.list_agents("token").await;
        assert!(matches!(result, Err(StoreError::Network(_))));
    }
}

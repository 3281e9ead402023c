use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::features::agents::handlers;
use crate::features::agents::services::AgentService;

/// Listing is open to every signed-in user; changes are administrator-only
pub fn routes(service: Arc<AgentService>) -> Router {
    Router::new()
        .route(
            "/api/agents",
            get(handlers::list_agents).post(handlers::create_agent),
        )
        .route(
            "/api/agents/{id}",
            put(handlers::update_agent).delete(handlers::delete_agent),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::agents::models::Agent;
    use crate::modules::record_store::memory::InMemoryRecordStore;
    use crate::shared::test_helpers::{awaiting, with_administrator_auth, with_operator_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn store() -> Arc<InMemoryRecordStore> {
        Arc::new(
            InMemoryRecordStore::new()
                .with_agents(vec![Agent {
                    id: "1".to_string(),
                    name: "YOGA".to_string(),
                    phone: None,
                    email: None,
                    address: None,
                }])
                .with_installations(vec![awaiting("1", "YOGA", "A", None)]),
        )
    }

    fn router(store: Arc<InMemoryRecordStore>) -> Router {
        routes(Arc::new(AgentService::new(store)))
    }

    #[tokio::test]
    async fn test_operator_can_list_but_not_create() {
        let store = store();
        let server = TestServer::new(with_operator_auth(router(store.clone()))).unwrap();

        let response = server.get("/api/agents").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"][0]["name"], "YOGA");

        server
            .post("/api/agents")
            .json(&json!({ "name": "bayu" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_administrator_creates_upper_cased_agent() {
        let store = store();
        let server = TestServer::new(with_administrator_auth(router(store.clone()))).unwrap();

        server
            .post("/api/agents")
            .json(&json!({ "name": "bayu", "phone": "081234567890" }))
            .await
            .assert_status(StatusCode::CREATED);

        let names: Vec<String> = store.agents().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["YOGA", "BAYU"]);

        server
            .post("/api/agents")
            .json(&json!({ "name": "Yoga" }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_agent_with_customers_cannot_be_deleted() {
        let server = TestServer::new(with_administrator_auth(router(store()))).unwrap();
        server
            .delete("/api/agents/1")
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_blank_agent_name_is_rejected() {
        let store = store();
        let server = TestServer::new(with_administrator_auth(router(store.clone()))).unwrap();

        server
            .post("/api/agents")
            .json(&json!({ "name": "   " }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(store.writes(), 0);
    }
}

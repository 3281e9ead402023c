use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::features::villages::handlers;
use crate::features::villages::services::VillageService;

pub fn routes(service: Arc<VillageService>) -> Router {
    Router::new()
        .route(
            "/api/villages",
            get(handlers::list_villages).post(handlers::create_village),
        )
        .route(
            "/api/villages/{id}",
            put(handlers::update_village).delete(handlers::delete_village),
        )
        .with_state(service)
}

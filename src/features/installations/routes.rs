use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::installations::handlers;
use crate::features::installations::services::InstallationService;

pub fn routes(service: Arc<InstallationService>) -> Router {
    Router::new()
        .route(
            "/api/installations",
            get(handlers::list_installations).post(handlers::create_installation),
        )
        .route(
            "/api/installations/{id}",
            get(handlers::get_installation)
                .put(handlers::update_installation)
                .delete(handlers::delete_installation),
        )
        .route(
            "/api/installations/{id}/confirm",
            post(handlers::confirm_installation),
        )
        .route(
            "/api/installations/{id}/commission",
            put(handlers::set_commission),
        )
        .with_state(service)
}

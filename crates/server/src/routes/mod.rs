use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

pub mod commands;
pub mod devices;
pub mod health;

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(devices::router())
        .merge(commands::router())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

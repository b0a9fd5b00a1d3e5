// src/web/handlers/system_handlers.rs
use crate::web::types::{ServerConfig, TextResponse};

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn health_handler(config: &State<ServerConfig>) -> Json<TextResponse> {
    let store_present = config.store.path().exists();
    info!("Health check (job store present: {})", store_present);

    Json(TextResponse::success(if store_present {
        "OK".to_string()
    } else {
        "OK (no job data imported yet)".to_string()
    }))
}

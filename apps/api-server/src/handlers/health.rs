//! Health check and root endpoints.

use actix_web::{HttpResponse, web};
use quickblog_shared::dto::HealthResponse;
use serde_json::json;

use crate::state::{AppState, StoreBackend};

/// GET /
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "QuickBlog API Server",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Health check endpoint - pings the store.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let backend = match state.backend {
        StoreBackend::Redis => "connected",
        StoreBackend::Memory => "in-memory",
    };

    match state.blog.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy".to_string(),
            redis: backend.to_string(),
        }),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            HttpResponse::InternalServerError().json(HealthResponse {
                status: "unhealthy".to_string(),
                redis: "disconnected".to_string(),
            })
        }
    }
}

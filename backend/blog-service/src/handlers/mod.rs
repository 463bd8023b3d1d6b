/// HTTP request handlers
pub mod auth;
pub mod comments;
pub mod posts;

use actix_web::{web, HttpResponse};

use crate::AppState;

/// Health check endpoint backed by a store ping.
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.users.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "blog-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": "blog-service"
            }))
        }
    }
}

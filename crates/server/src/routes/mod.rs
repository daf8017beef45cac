//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: liveness, readiness and service metadata
//! - `instructions`: ingredient instruction lookups and product matching
//! - `contact`: contact-form email notification

pub mod contact;
pub mod health;
pub mod instructions;

use crate::error::{ServerError, ServerResult};
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
/// This is the root endpoint (GET /).
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "VGreen Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/instructions",
            "/api/instructions/search",
            "/api/instructions/match-product",
            "/api/instructions/by-ingredient/{ingredient}",
            "/api/instructions/{id}",
            "/api/contact/send",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(format!("No route for {}", uri.path()))
}

use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mailer::ContactMessage;
use serde_json::json;
use std::sync::Arc;

/// Send a contact-form request to the support inbox and a confirmation to
/// the customer.
pub async fn send_contact(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<ContactMessage>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(message) = payload?;
    state.notifier.notify(&message).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Email sent successfully",
    })))
}

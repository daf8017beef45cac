use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mailer::NotifyError;
use matcher::MatchError;
use serde::{Deserialize, Serialize};
use store::StoreError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The instruction store could not be read. The detail is returned to the
    /// caller for diagnostics.
    #[error("Instruction store unavailable")]
    StoreUnavailable(String),

    #[error("Failed to send email, please try again later")]
    Delivery(String),

    #[error("Service not ready: {0}")]
    NotReady(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure body returned by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::StoreUnavailable(_)
            | ServerError::Delivery(_)
            | ServerError::Internal(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::NotFound(_) => "NOT_FOUND",
            ServerError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            ServerError::Delivery(_) => "EMAIL_DELIVERY_FAILED",
            ServerError::NotReady(_) => "NOT_READY",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            ServerError::StoreUnavailable(detail) | ServerError::Delivery(detail) => {
                Some(detail.clone())
            }
            _ => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), detail = ?self.detail(), "{}", self);
        }

        let body = ErrorResponse {
            success: false,
            code: self.error_code().to_string(),
            message: self.to_string(),
            error: self.detail(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<MatchError> for ServerError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::InvalidArgument(msg) => ServerError::BadRequest(msg),
            MatchError::NotFound(id) => ServerError::NotFound(format!("Instruction not found: {id}")),
            MatchError::DependencyUnavailable(source) => {
                ServerError::StoreUnavailable(source.to_string())
            }
        }
    }
}

impl From<NotifyError> for ServerError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::InvalidInput(msg) => ServerError::BadRequest(msg),
            NotifyError::Delivery(detail) => ServerError::Delivery(detail),
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        ServerError::StoreUnavailable(err.to_string())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

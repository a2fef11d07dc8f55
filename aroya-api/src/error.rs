use aroya_cabin::gateway::GatewayError;
use aroya_core::envelope::{ResponseCode, ResponseEnvelope};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}", .1.message)]
    Envelope(StatusCode, ResponseEnvelope),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Map a gateway failure to its HTTP status, carrying the failure
    /// envelope as the response body
    pub fn gateway(error: GatewayError) -> Self {
        let status = match error.code {
            ResponseCode::ReservationIdRequired => StatusCode::BAD_REQUEST,
            ResponseCode::ReservationNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::Envelope(
            status,
            ResponseEnvelope::failure(error.code, error.message, json!({})),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Envelope(status, envelope) => (status, Json(envelope)).into_response(),
            AppError::Internal(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal Server Error"})),
                )
                    .into_response()
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.into())
    }
}

//! HTTP mapping of domain errors

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::DomainError;

pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::ItemNotFound(_)
        | DomainError::UserNotFound(_)
        | DomainError::BookingNotFound(_)
        | DomainError::ItemRequestNotFound(_)
        | DomainError::NotItemOwner { .. } => StatusCode::NOT_FOUND,
        DomainError::ItemNotAvailable(_)
        | DomainError::BookingStatusConflict(_)
        | DomainError::UnknownBookingState(_)
        | DomainError::InvalidInterval(_)
        | DomainError::CommentNotAllowed { .. }
        | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::EmailConflict(_) => StatusCode::CONFLICT,
        DomainError::Database(_) | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = status_for(&self);

        // Storage details stay in the log
        let message = if status.is_server_error() {
            tracing::error!("{}", self);
            "Internal server error".to_string()
        } else {
            tracing::warn!("{} ({})", self, status);
            self.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.kind(),
                "message": message,
            })),
        )
            .into_response()
    }
}

impl From<JsonRejection> for DomainError {
    fn from(rejection: JsonRejection) -> Self {
        DomainError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for DomainError {
    fn from(rejection: QueryRejection) -> Self {
        DomainError::Validation(rejection.body_text())
    }
}

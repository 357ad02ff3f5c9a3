use crate::app_error::AppError;
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        let (status, message) = match &self {
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".into()),
            AppError::DuplicateEmail => (StatusCode::CONFLICT, self.to_string()),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            // The provider's message is surfaced for operator diagnosis.
            AppError::PaymentProvider(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::AlreadyEntitled => (StatusCode::CONFLICT, self.to_string()),
            AppError::EmptyCode => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::InvalidOrUsedCode => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into()),
        };

        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

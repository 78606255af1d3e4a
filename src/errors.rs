use crate::services::{
    apod_service::ApodError, record_store::StoreError, token_service::AuthError,
};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::error;

/// A lightweight wrapper for general errors that keeps the message local.
///
/// Internal details (paths, io errors, token parse failures) are logged and
/// never copied into `message`.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 404 Not Found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    /// Shortcut for 400 Bad Request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "status": self.status.as_u16()
        }));

        (self.status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::new(rejection.status(), rejection.body_text())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        error!("storage failure: {}", err);
        if err.is_read() {
            AppError::internal("Error reading file")
        } else {
            AppError::internal("Error writing file")
        }
    }
}

impl From<ApodError> for AppError {
    fn from(err: ApodError) -> Self {
        match err {
            ApodError::NotFound(_) => AppError::not_found("APOD not found"),
            ApodError::Store(err) => err.into(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => AppError::new(StatusCode::UNAUTHORIZED, "No token provided"),
            AuthError::InvalidToken(_) => AppError::new(StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthError::Forbidden { .. } => AppError::new(StatusCode::FORBIDDEN, "Access denied"),
            AuthError::Issue(err) => {
                error!("token signing failed: {}", err);
                AppError::internal("Could not issue token")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_hide_details() {
        let read: AppError = StoreError::Read {
            path: "/secret/apod.json".into(),
            source: std::io::Error::other("boom"),
        }
        .into();
        assert_eq!(read.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read.message, "Error reading file");

        let write: AppError = ApodError::Store(StoreError::Write {
            path: "/secret/apod.json".into(),
            source: std::io::Error::other("boom"),
        })
        .into();
        assert_eq!(write.message, "Error writing file");
    }

    #[test]
    fn auth_errors_split_unauthenticated_and_forbidden() {
        assert_eq!(AppError::from(AuthError::MissingToken).status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::from(AuthError::Forbidden { role: Some("user".into()) }).status,
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn not_found_uses_static_message() {
        let err = AppError::from(ApodError::NotFound("2024-01-01".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "APOD not found");
    }
}

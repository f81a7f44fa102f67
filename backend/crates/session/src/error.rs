//! Session Error Types
//!
//! Session-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Session-specific result type alias
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-specific error variants
#[derive(Debug, Error)]
pub enum SessionError {
    /// The table already holds the maximum number of sessions
    #[error("Maximum concurrent sessions reached")]
    CapacityExceeded,

    /// Key unknown, released, or expired
    #[error("Session not found or expired")]
    NotFound,

    /// Key exists but belongs to a different client
    #[error("Session fingerprint mismatch")]
    FingerprintMismatch,

    /// `X-Session-Key` header absent or empty
    #[error("Missing session key")]
    MissingSessionKey,
}

impl SessionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SessionError::CapacityExceeded => StatusCode::TOO_MANY_REQUESTS,
            SessionError::NotFound => StatusCode::NOT_FOUND,
            SessionError::FingerprintMismatch => StatusCode::FORBIDDEN,
            SessionError::MissingSessionKey => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::CapacityExceeded => ErrorKind::TooManyRequests,
            SessionError::NotFound => ErrorKind::NotFound,
            SessionError::FingerprintMismatch => ErrorKind::Forbidden,
            SessionError::MissingSessionKey => ErrorKind::BadRequest,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let message = self.to_string();
        match self {
            SessionError::CapacityExceeded => {
                AppError::too_many_requests(message).with_action("Try again later")
            }
            SessionError::NotFound => AppError::not_found(message).with_action("Claim a new session"),
            SessionError::FingerprintMismatch => AppError::forbidden(message),
            SessionError::MissingSessionKey => {
                AppError::bad_request(message).with_action("Send the X-Session-Key header")
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            SessionError::CapacityExceeded => {
                tracing::warn!("Session capacity exhausted");
            }
            SessionError::FingerprintMismatch => {
                tracing::warn!("Session fingerprint mismatch detected");
            }
            _ => {
                tracing::debug!(error = %self, "Session error");
            }
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

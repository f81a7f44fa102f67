//! Vision Error Types
//!
//! Vision-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use session::{SessionError, ValidationStatus};
use thiserror::Error;

/// Vision-specific result type alias
pub type VisionResult<T> = Result<T, VisionError>;

/// Vision-specific error variants
#[derive(Debug, Error)]
pub enum VisionError {
    /// No `X-Session-Key` header
    #[error("Session key required")]
    MissingSessionKey,

    /// Key unknown, expired or bound to another client
    #[error("Invalid or expired session")]
    InvalidSession(ValidationStatus),

    /// Per-client request budget spent for this window
    #[error("Rate limit exceeded")]
    RateLimited { retry_after_secs: u64 },

    /// Body has no `image`
    #[error("Missing image")]
    MissingImage,

    /// Body exceeds the configured size limit
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Body is not the expected JSON, or the image payload is unusable
    #[error("Malformed request: {0}")]
    MalformedInput(String),

    /// Upstream API key not configured
    #[error("Vision model is not configured")]
    NotConfigured,

    /// Upstream did not answer within the configured timeout
    #[error("Vision model timed out")]
    UpstreamTimeout,

    /// Upstream failed or returned something unusable
    #[error("Vision analysis failed: {0}")]
    Upstream(String),

    /// Session store failure
    #[error("Session store error: {0}")]
    Session(#[from] SessionError),
}

impl VisionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            VisionError::MissingSessionKey | VisionError::InvalidSession(_) => {
                StatusCode::UNAUTHORIZED
            }
            VisionError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            VisionError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            VisionError::MissingImage | VisionError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            VisionError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            VisionError::NotConfigured
            | VisionError::Upstream(_)
            | VisionError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            VisionError::MissingSessionKey | VisionError::InvalidSession(_) => {
                ErrorKind::Unauthorized
            }
            VisionError::RateLimited { .. } => ErrorKind::TooManyRequests,
            VisionError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            VisionError::MissingImage | VisionError::MalformedInput(_) => ErrorKind::BadRequest,
            VisionError::UpstreamTimeout => ErrorKind::GatewayTimeout,
            VisionError::NotConfigured
            | VisionError::Upstream(_)
            | VisionError::Session(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Upstream and store details are logged, not returned.
    pub fn to_app_error(&self) -> AppError {
        let message = self.to_string();
        match self {
            VisionError::MissingSessionKey | VisionError::InvalidSession(_) => {
                AppError::unauthorized(message).with_action("Claim a session first")
            }
            VisionError::RateLimited { retry_after_secs } => {
                AppError::too_many_requests(message).with_retry_after(*retry_after_secs)
            }
            VisionError::PayloadTooLarge => {
                AppError::payload_too_large(message).with_action("Send a smaller image")
            }
            VisionError::MissingImage | VisionError::MalformedInput(_) => {
                AppError::bad_request(message)
            }
            VisionError::UpstreamTimeout => {
                AppError::gateway_timeout(message).with_action("Retry the request")
            }
            VisionError::NotConfigured => AppError::internal(message),
            VisionError::Upstream(_) => AppError::internal("Vision analysis failed"),
            VisionError::Session(_) => AppError::internal("Internal server error"),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            VisionError::Upstream(msg) => {
                tracing::error!(message = %msg, "Vision upstream failure");
            }
            VisionError::UpstreamTimeout => {
                tracing::error!("Vision upstream timed out");
            }
            VisionError::NotConfigured => {
                tracing::error!("Vision request rejected: no upstream API key");
            }
            VisionError::Session(e) => {
                tracing::error!(error = %e, "Vision gate session error");
            }
            VisionError::RateLimited { .. } => {
                tracing::warn!("Vision rate limit exceeded");
            }
            VisionError::InvalidSession(status) => {
                tracing::debug!(reason = status.as_str(), "Vision request with invalid session");
            }
            _ => {
                tracing::debug!(error = %self, "Vision error");
            }
        }
    }
}

impl From<VisionError> for AppError {
    fn from(err: VisionError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for VisionError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

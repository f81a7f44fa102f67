//! Schedule Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type ScheduleResult<T> = Result<T, ScheduleError>;

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Request body is not a schedule
    #[error("Malformed schedule: {0}")]
    MalformedInput(String),

    /// Schedule file could not be read, parsed or written
    #[error("Schedule persistence failed: {0}")]
    Persistence(String),
}

impl ScheduleError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScheduleError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ScheduleError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScheduleError::MalformedInput(_) => ErrorKind::BadRequest,
            ScheduleError::Persistence(_) => ErrorKind::InternalServerError,
        }
    }

    /// File paths and io details stay in the log
    pub fn to_app_error(&self) -> AppError {
        match self {
            ScheduleError::MalformedInput(_) => AppError::bad_request(self.to_string())
                .with_action("Send a JSON array of schedule entries"),
            ScheduleError::Persistence(_) => AppError::internal("Failed to access schedule"),
        }
    }

    fn log(&self) {
        match self {
            ScheduleError::Persistence(msg) => {
                tracing::error!(message = %msg, "Schedule persistence error");
            }
            ScheduleError::MalformedInput(msg) => {
                tracing::debug!(message = %msg, "Rejected schedule body");
            }
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for ScheduleError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

//! Error types returned by state operations and the HTTP layer

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::api::responses::ErrorResponse;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("timer {0} is not mounted")]
    TimerNotFound(Uuid),

    #[error("gate {0} is not mounted")]
    GateNotFound(Uuid),

    #[error("duration must be a positive number of seconds")]
    InvalidDuration,

    #[error("failed to lock {0}")]
    StatePoisoned(&'static str),

    /// Path or body the router could not parse
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::TimerNotFound(_) | AppError::GateNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidDuration => StatusCode::BAD_REQUEST,
            AppError::StatePoisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected { status, .. } => *status,
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status_code().is_server_error() {
            tracing::error!("{}", self);
        }
        (self.status_code(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

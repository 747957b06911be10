//! Sink Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::entities::SinkKind;

pub type SinkResult<T> = Result<T, SinkError>;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("{0}")]
    InvalidInput(String),

    /// Nothing deletable under that id
    #[error("{}", not_found_message(.0))]
    NotFound(SinkKind),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn not_found_message(kind: &SinkKind) -> &'static str {
    match kind {
        SinkKind::Planned => "Sink entry not found for the current day.",
        SinkKind::Existing => "ExistingSink entry not found.",
    }
}

impl SinkError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SinkError::InvalidInput(_) => ErrorKind::BadRequest,
            SinkError::NotFound(_) => ErrorKind::NotFound,
            SinkError::Database(_) | SinkError::Internal(_) => ErrorKind::InternalServerError,
            SinkError::App(e) => e.kind(),
        }
    }

    fn log(&self) {
        match self {
            SinkError::Database(e) => {
                tracing::error!(error = %e, "Sink database error");
            }
            SinkError::Internal(msg) => {
                tracing::error!(message = %msg, "Sink internal error");
            }
            SinkError::App(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Sink error");
            }
            _ => {
                tracing::debug!(error = %self, "Sink request rejected");
            }
        }
    }
}

impl From<SinkError> for AppError {
    fn from(err: SinkError) -> Self {
        match err {
            SinkError::App(e) => e,
            SinkError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for SinkError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

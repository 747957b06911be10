//! Report Error Types
//!
//! Report-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Store errors from the emission and
//! sink contexts are carried as-is.

use axum::response::{IntoResponse, Response};
use emission::EmissionError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::http::UpstreamError;
use sink::SinkError;
use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Unknown report range: {0}")]
    UnknownRange(String),

    /// Every emission and sink source failed for the window
    #[error("Emission data is unavailable")]
    AllSourcesFailed,

    #[error(transparent)]
    Emission(#[from] EmissionError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Narrative provider failed
    #[error("Failed to analyze emissions data with GenAI.")]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReportError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::InvalidInput(_) => ErrorKind::BadRequest,
            ReportError::UnknownRange(_) => ErrorKind::NotFound,
            ReportError::AllSourcesFailed => ErrorKind::ServiceUnavailable,
            ReportError::Emission(e) => e.kind(),
            ReportError::Sink(e) => e.kind(),
            ReportError::Upstream(e) if e.is_timeout() => ErrorKind::GatewayTimeout,
            ReportError::Upstream(_) => ErrorKind::BadGateway,
            ReportError::App(e) => e.kind(),
            ReportError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    fn log(&self) {
        match self {
            ReportError::Upstream(e) => {
                tracing::error!(service = e.service(), error = %e, "Narrative provider error");
            }
            ReportError::AllSourcesFailed => {
                tracing::error!("No report source could be loaded");
            }
            ReportError::Internal(msg) => {
                tracing::error!(message = %msg, "Report internal error");
            }
            other if other.kind().is_server_error() => {
                tracing::error!(error = %other, "Report error");
            }
            _ => {
                tracing::debug!(error = %self, "Report request rejected");
            }
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::App(e) => e,
            ReportError::Emission(e) => AppError::from(e),
            ReportError::Sink(e) => AppError::from(e),
            ReportError::Upstream(e) => {
                let kind = if e.is_timeout() {
                    ErrorKind::GatewayTimeout
                } else {
                    ErrorKind::BadGateway
                };
                AppError::new(kind, "Failed to analyze emissions data with GenAI.").with_source(e)
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

//! Emission Error Types
//!
//! Emission-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::http::UpstreamError;
use thiserror::Error;

/// Emission-specific result type alias
pub type EmissionResult<T> = Result<T, EmissionError>;

#[derive(Debug, Error)]
pub enum EmissionError {
    /// Unknown explosive in the factor table
    #[error("Invalid explosive type")]
    InvalidExplosiveType,

    #[error("Invalid coal type. Valid types are: Lignite, Sub-bituminous, Bituminous, Anthracite")]
    InvalidCoalType,

    #[error("Invalid mining type")]
    InvalidMiningType,

    /// A required request field is missing or not numeric
    #[error("{0}")]
    InvalidInput(String),

    /// No record with that id was created today
    #[error("Entry not found for the current day.")]
    NotFoundToday,

    /// Calculation provider failed; nothing was saved
    #[error("Failed to fetch data")]
    Upstream(#[from] UpstreamError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Date parsing and other kernel-level failures
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EmissionError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EmissionError::InvalidExplosiveType
            | EmissionError::InvalidCoalType
            | EmissionError::InvalidMiningType
            | EmissionError::InvalidInput(_) => ErrorKind::BadRequest,
            EmissionError::NotFoundToday => ErrorKind::NotFound,
            EmissionError::Upstream(e) if e.is_timeout() => ErrorKind::GatewayTimeout,
            EmissionError::Upstream(_) => ErrorKind::BadGateway,
            EmissionError::Database(_) | EmissionError::Internal(_) => {
                ErrorKind::InternalServerError
            }
            EmissionError::App(e) => e.kind(),
        }
    }

    fn log(&self) {
        match self {
            EmissionError::Database(e) => {
                tracing::error!(error = %e, "Emission database error");
            }
            EmissionError::Upstream(e) => {
                tracing::error!(service = e.service(), error = %e, "Emission provider error");
            }
            EmissionError::Internal(msg) => {
                tracing::error!(message = %msg, "Emission internal error");
            }
            EmissionError::App(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Emission error");
            }
            _ => {
                tracing::debug!(error = %self, "Emission request rejected");
            }
        }
    }
}

impl From<EmissionError> for AppError {
    fn from(err: EmissionError) -> Self {
        match err {
            EmissionError::App(e) => e,
            EmissionError::Database(e) => AppError::from(e),
            EmissionError::Upstream(e) => {
                let kind = if e.is_timeout() {
                    ErrorKind::GatewayTimeout
                } else {
                    ErrorKind::BadGateway
                };
                AppError::new(kind, "Failed to fetch data").with_source(e)
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for EmissionError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        assert_eq!(EmissionError::InvalidExplosiveType.kind(), ErrorKind::BadRequest);
        assert_eq!(EmissionError::InvalidCoalType.kind(), ErrorKind::BadRequest);
        assert_eq!(EmissionError::InvalidMiningType.kind(), ErrorKind::BadRequest);
        assert_eq!(
            EmissionError::invalid_input("missing").kind(),
            ErrorKind::BadRequest
        );
    }

    #[test]
    fn test_not_found_today_message() {
        let app: AppError = EmissionError::NotFoundToday.into();
        assert_eq!(app.status_code(), 404);
        assert_eq!(app.message(), "Entry not found for the current day.");
    }

    #[test]
    fn test_upstream_status_is_bad_gateway() {
        let err = EmissionError::from(UpstreamError::Status {
            service: "CarbonKit",
            status: 500,
            detail: String::new(),
        });
        assert_eq!(err.kind(), ErrorKind::BadGateway);
        let app: AppError = err.into();
        assert_eq!(app.status_code(), 502);
    }

    #[test]
    fn test_kernel_error_passes_through() {
        let err = EmissionError::from(AppError::bad_request("Invalid date format. Please use YYYY-MM-DD."));
        let app: AppError = err.into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.message(), "Invalid date format. Please use YYYY-MM-DD.");
    }
}

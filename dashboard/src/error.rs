//! Dashboard-specific error types

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use shared::{SharedError, component_error};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Data source unavailable: {message}")]
    DataSourceUnavailable { message: String },

    #[error("Data source returned {status} for {url}")]
    DataSourceStatus { status: u16, url: String },

    #[error("Data source payload invalid: {message}")]
    DataSourcePayload { message: String },

    #[error("A contract fetch is already in flight")]
    FetchInProgress,

    #[error("Contract not found: {id}")]
    ContractNotFound { id: String },

    #[error("Upload not found: {id}")]
    UploadNotFound { id: String },

    #[error("Invalid query: {details}")]
    InvalidQuery { details: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl DashboardError {
    pub fn config(message: impl Into<String>) -> Self {
        DashboardError::Config(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        DashboardError::DataSourceUnavailable { message: message.into() }
    }

    /// Whether the error came from the data source collaborator
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            DashboardError::DataSourceUnavailable { .. }
                | DashboardError::DataSourceStatus { .. }
                | DashboardError::DataSourcePayload { .. }
        )
    }

    /// HTTP status used when the error crosses the API boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::ContractNotFound { .. } | DashboardError::UploadNotFound { .. } => StatusCode::NOT_FOUND,
            DashboardError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            DashboardError::FetchInProgress => StatusCode::CONFLICT,
            DashboardError::DataSourceUnavailable { .. }
            | DashboardError::DataSourceStatus { .. }
            | DashboardError::DataSourcePayload { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DashboardError::DataSourceUnavailable {
                message: format!("request timed out: {err}"),
            }
        } else if err.is_decode() {
            DashboardError::DataSourcePayload { message: err.to_string() }
        } else {
            DashboardError::DataSourceUnavailable { message: err.to_string() }
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            component_error!("api", error = %self, status = status.as_u16(), "Request failed");
        }

        let body = json!({
            "status": "error",
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            DashboardError::ContractNotFound { id: "x".into() }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DashboardError::InvalidQuery { details: "page".into() }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(DashboardError::FetchInProgress.status_code(), StatusCode::CONFLICT);
        assert_eq!(DashboardError::unavailable("down").status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(DashboardError::config("bad").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_status() {
        let response = DashboardError::FetchInProgress.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = DashboardError::UploadNotFound { id: "u-1".into() }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_fetch_failure_classification() {
        assert!(DashboardError::unavailable("refused").is_fetch_failure());
        assert!(
            DashboardError::DataSourceStatus { status: 500, url: "http://x".into() }.is_fetch_failure()
        );
        assert!(!DashboardError::FetchInProgress.is_fetch_failure());
    }
}

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use drill_srs::SrsError;
use serde_json::json;
use thiserror::Error;

/// SQLSTATE codes a caller can resolve by retrying the whole operation.
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("the problem catalog is empty, import problems before generating a plan")]
    EmptyCatalog,
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl ApiError {
    pub fn not_found(what: &str) -> Self {
        Self::NotFound(format!("{what} not found"))
    }

    /// Stable machine-readable error kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::EmptyCatalog => "empty_catalog",
            Self::Conflict(_) => "conflict",
            Self::Database(_) => "internal_error",
        }
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::EmptyCatalog => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound("resource not found".to_string()),
            sqlx::Error::Database(db) => match db.code().as_deref() {
                Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED) => Self::Conflict(
                    "the record was modified concurrently, retry the request".to_string(),
                ),
                Some(UNIQUE_VIOLATION) => {
                    Self::Conflict("the record already exists".to_string())
                }
                _ => Self::Database(err),
            },
            _ => Self::Database(err),
        }
    }
}

impl From<SrsError> for ApiError {
    fn from(err: SrsError) -> Self {
        match err {
            SrsError::Validation(message) => Self::Validation(message),
            SrsError::EmptyCatalog => Self::EmptyCatalog,
            SrsError::InvalidTransition(_) => Self::Validation(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Database(err) => {
                tracing::error!(error = %err, "database error");
                "internal server error".to_string()
            }
            other => {
                tracing::debug!(kind = other.kind(), "request rejected: {other}");
                other.to_string()
            }
        };

        (
            status,
            Json(json!({ "error": self.kind(), "message": message })),
        )
            .into_response()
    }
}

//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::error_body;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Failures reported by a [`crate::store::StudentStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Unavailable(#[source] sqlx::Error),
    #[error("unique constraint violated")]
    Duplicate,
    #[error("value for {field} rejected: {reason}")]
    Rejected { field: &'static str, reason: String },
    #[error("query: {0}")]
    Query(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if sqlx::error::DatabaseError::is_unique_violation(db.as_ref()) {
                return StoreError::Duplicate;
            }
        }
        if matches!(
            e,
            sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
        ) {
            StoreError::Unavailable(e)
        } else {
            StoreError::Query(e)
        }
    }
}

/// The operation a request was performing; names the generic 500 message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ListStudents,
    FetchStudent,
    CreateStudent,
    UpdateStudent,
    DeleteStudent,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::ListStudents => "fetch students",
            Action::FetchStudent => "fetch student",
            Action::CreateStudent => "create student",
            Action::UpdateStudent => "update student",
            Action::DeleteStudent => "delete student",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database connection failed")]
    Unavailable(#[source] sqlx::Error),
    #[error("Student not found")]
    NotFound,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Email already exists")]
    Duplicate,
    #[error("Failed to {}", .action.as_str())]
    Failed {
        action: Action,
        #[source]
        source: StoreError,
    },
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Payload(#[from] JsonRejection),
    #[error("Not found")]
    RouteNotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl AppError {
    /// Map a store failure to the response for `action`.
    pub fn from_store(action: Action, e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(source) => AppError::Unavailable(source),
            StoreError::Duplicate => AppError::Duplicate,
            source => AppError::Failed { action, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unavailable(_) | AppError::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::MissingField(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Duplicate => StatusCode::CONFLICT,
            AppError::Payload(rejection) => rejection.status(),
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Unavailable(e) => tracing::error!(error = %e, "database connection error"),
            AppError::Failed { action, source } => {
                tracing::error!(action = action.as_str(), error = %source, "store operation failed")
            }
            _ => {}
        }
        let message = match &self {
            AppError::Payload(rejection) => rejection.body_text(),
            other => other.to_string(),
        };
        (self.status(), Json(error_body(message))).into_response()
    }
}

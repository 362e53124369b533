//! Typed errors and HTTP mapping.

use crate::config::ErrorExposure;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::error::{DatabaseError, ErrorKind};
use sqlx::postgres::PgDatabaseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Connection manager failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid connection string: {0}")]
    Configuration(#[source] sqlx::Error),
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("database connection is closed")]
    Closed,
    #[error("schema sync failed: {0}")]
    Sync(#[source] sqlx::Error),
}

impl StoreError {
    pub(crate) fn from_round_trip(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolClosed => StoreError::Closed,
            other => StoreError::Connection(other),
        }
    }
}

/// Failures while serving or shutting down; either one makes the process exit non-zero.
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
    #[error("closing database connections failed: {0}")]
    Close(#[from] StoreError),
}

/// One rejected input field.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("database connection is closed")]
    Closed,
    #[error("rejected by database: {}", join_messages(.0))]
    Validation(Vec<FieldError>),
    #[error("database: {0}")]
    Database(#[source] sqlx::Error),
}

fn join_messages(details: &[FieldError]) -> String {
    details.iter().map(|d| d.message.as_str()).collect::<Vec<_>>().join("; ")
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolClosed => RepositoryError::Closed,
            sqlx::Error::PoolTimedOut
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::WorkerCrashed => RepositoryError::Connection(e),
            sqlx::Error::Database(db) => match constraint_details(&*db) {
                Some(details) => RepositoryError::Validation(details),
                None => RepositoryError::Database(sqlx::Error::Database(db)),
            },
            other => RepositoryError::Database(other),
        }
    }
}

/// Store-side rejections of the row itself, as opposed to infrastructure failures.
fn constraint_details(db: &(dyn DatabaseError + 'static)) -> Option<Vec<FieldError>> {
    let too_long = db.code().as_deref() == Some("22001");
    let constraint = matches!(
        db.kind(),
        ErrorKind::NotNullViolation | ErrorKind::CheckViolation | ErrorKind::UniqueViolation
    );
    if !too_long && !constraint {
        return None;
    }
    let field = db
        .try_downcast_ref::<PgDatabaseError>()
        .and_then(|pg| pg.column())
        .map(String::from)
        .or_else(|| db.constraint().map(field_from_constraint))
        .unwrap_or_else(|| "value".into());
    Some(vec![FieldError::new(field, db.message())])
}

/// `suppliers_name_check` -> `name`. PostgreSQL names generated constraints `<table>_<column>_<suffix>`.
fn field_from_constraint(constraint: &str) -> String {
    let trimmed = ["_check", "_key", "_not_null", "_pkey"]
        .iter()
        .find_map(|suffix| constraint.strip_suffix(suffix))
        .unwrap_or(constraint);
    match trimmed.split_once('_') {
        Some((_table, column)) if !column.is_empty() => column.to_string(),
        _ => trimmed.to_string(),
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Validation error")]
    Validation(Vec<FieldError>),
    #[error("Malformed JSON body")]
    MalformedRequest(String),
    #[error("Payload too large")]
    PayloadTooLarge(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{operation} failed")]
    Failed {
        operation: &'static str,
        #[source]
        source: RepositoryError,
        exposure: ErrorExposure,
    },
}

impl AppError {
    /// Translate a repository failure for `operation`. Store-side validation stays a 400.
    pub fn repository(operation: &'static str, source: RepositoryError, exposure: ErrorExposure) -> Self {
        match source {
            RepositoryError::Validation(details) => AppError::Validation(details),
            source => AppError::Failed {
                operation,
                source,
                exposure,
            },
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
            details: None,
            stack: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorBody::new(message)),
            AppError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    details: Some(serde_json::json!(details)),
                    ..ErrorBody::new(message)
                },
            ),
            AppError::MalformedRequest(reason) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    details: Some(serde_json::json!([reason])),
                    ..ErrorBody::new(message)
                },
            ),
            AppError::PayloadTooLarge(reason) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody {
                    details: Some(serde_json::json!([reason])),
                    ..ErrorBody::new(message)
                },
            ),
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, ErrorBody::new(message)),
            AppError::Failed {
                operation,
                source,
                exposure,
            } => {
                tracing::error!(operation, error = %source, debug = ?source, "request failed");
                let mut body = ErrorBody::new(message);
                if exposure.verbose {
                    body.details = Some(serde_json::Value::String(source.to_string()));
                    body.stack = Some(format!("{:?}", source));
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };
        (status, Json(body)).into_response()
    }
}

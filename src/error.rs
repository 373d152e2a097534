//! Typed errors and HTTP mapping.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid setting {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
    #[error("invalid identifier in model: {0}")]
    InvalidIdentifier(String),
    #[error("missing reference: {kind} '{id}'")]
    MissingReference { kind: &'static str, id: String },
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("duplicate table: {0}")]
    DuplicateTable(String),
    #[error("{table}.{column} is reserved for the generated primary key")]
    ReservedColumn { table: String, column: &'static str },
    #[error("{table}.{column} defined twice")]
    DuplicateColumn { table: String, column: String },
}

/// Failure at the persistence boundary. Always carries the driver-reported message.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),
    #[error("constraint violation ({constraint}): {source}")]
    Constraint {
        constraint: ConstraintKind,
        #[source]
        source: sqlx::Error,
    },
    #[error("invalid data: {0}")]
    InvalidData(#[source] sqlx::Error),
    #[error("insert into {table} returned no generated key")]
    MissingGeneratedKey { table: &'static str },
    #[error("sql: {0}")]
    Sql(#[source] sqlx::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintKind {
    ForeignKey,
    Unique,
    NotNull,
    Check,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::Unique => "unique",
            ConstraintKind::NotNull => "not null",
            ConstraintKind::Check => "check",
        })
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StorageError::Unavailable(e),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => StorageError::InvalidData(e),
            sqlx::Error::Database(db) => {
                // SQLSTATE class 23 is integrity violations, class 22 is data exceptions,
                // 57014 is query_canceled (statement_timeout).
                let code = db.code().map(|c| c.into_owned()).unwrap_or_default();
                let constraint = match code.as_str() {
                    "23503" => Some(ConstraintKind::ForeignKey),
                    "23505" => Some(ConstraintKind::Unique),
                    "23502" => Some(ConstraintKind::NotNull),
                    "23514" => Some(ConstraintKind::Check),
                    _ => None,
                };
                if let Some(constraint) = constraint {
                    StorageError::Constraint { constraint, source: e }
                } else if code.starts_with("22") {
                    StorageError::InvalidData(e)
                } else if code == "57014" || code.starts_with("08") || code.starts_with("53") {
                    StorageError::Unavailable(e)
                } else {
                    StorageError::Sql(e)
                }
            }
            _ => StorageError::Sql(e),
        }
    }
}

/// Failure while bringing the service up: settings, model validation, pool or schema.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<sqlx::Error> for StartupError {
    fn from(e: sqlx::Error) -> Self {
        StartupError::Storage(e.into())
    }
}

/// Error surfaced to HTTP callers. Every variant carries a human-readable reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn reason(&self) -> &str {
        match self {
            ServiceError::NotFound(r)
            | ServiceError::Conflict(r)
            | ServiceError::StorageUnavailable(r)
            | ServiceError::InvalidInput(r)
            | ServiceError::Internal(r) => r,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(e: StorageError) -> Self {
        let reason = e.to_string();
        match e {
            StorageError::Unavailable(_) => ServiceError::StorageUnavailable(reason),
            StorageError::Constraint {
                constraint: ConstraintKind::ForeignKey | ConstraintKind::Unique,
                ..
            } => ServiceError::Conflict(reason),
            StorageError::Constraint { .. } | StorageError::InvalidData(_) => ServiceError::InvalidInput(reason),
            StorageError::MissingGeneratedKey { .. } | StorageError::Sql(_) => ServiceError::Internal(reason),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.reason().to_string(),
        )
            .into_response()
    }
}

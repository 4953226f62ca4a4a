use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, TransactionError};
use serde_json::json;

use crate::models::ValidationError;

/// Failures raised while talking to the database.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No connection could be obtained; nothing was executed.
    #[error("error connecting to database: {0}")]
    Connection(DbErr),
    /// The statement failed and its transaction was rolled back.
    #[error("error executing query: {0}")]
    Query(DbErr),
    #[error("error creating tables: {0}")]
    Schema(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => Self::Connection(err),
            other => Self::Query(other),
        }
    }
}

impl From<TransactionError<DbErr>> for StoreError {
    fn from(err: TransactionError<DbErr>) -> Self {
        match err {
            TransactionError::Connection(err) => match err {
                DbErr::Exec(_) | DbErr::Query(_) => Self::Query(err),
                other => Self::Connection(other),
            },
            TransactionError::Transaction(err) => err.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: i32 },
    #[error("Error {action}: {source}")]
    Store { action: &'static str, source: StoreError },
    #[error("{message}")]
    Body { status: StatusCode, message: String },
}

impl ApiError {
    /// Wraps a storage failure with the operation that was being attempted,
    /// e.g. `.map_err(ApiError::store("creating film"))`.
    pub fn store(action: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { action, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Body { status, .. } => *status,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body { status: rejection.status(), message: rejection.body_text() }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Body { status: rejection.status(), message: rejection.body_text() }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Body { status: rejection.status(), message: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Store { action, source } = &self {
            tracing::error!(action, error = %source, "storage failure");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

//! Ads Error Types
//!
//! This module provides ads-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind, store::StoreError};
use thiserror::Error;

use crate::domain::services::{AdValidationError, QueryError};

/// Ads-specific result type alias
pub type AdsResult<T> = Result<T, AdsError>;

/// Ads-specific error variants
#[derive(Debug, Error)]
pub enum AdsError {
    /// Input failed validation; the message is the reason
    #[error("{0}")]
    Validation(String),

    /// No ad with the requested ID
    #[error("ad not found")]
    NotFound,

    /// A uniqueness rule rejected the ad
    #[error("ad already exists")]
    Conflict,

    /// Store failure not mapped to a domain outcome
    #[error("Store error: {0}")]
    Store(#[source] StoreError),
}

impl AdsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdsError::Validation(_) => StatusCode::BAD_REQUEST,
            AdsError::NotFound => StatusCode::NOT_FOUND,
            AdsError::Conflict => StatusCode::CONFLICT,
            AdsError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdsError::Validation(_) => ErrorKind::BadRequest,
            AdsError::NotFound => ErrorKind::NotFound,
            AdsError::Conflict => ErrorKind::Conflict,
            AdsError::Store(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AdsError::Store(_) => AppError::internal("internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AdsError::Store(e) => {
                tracing::error!(error = %e, "Ads store error");
            }
            _ => {
                tracing::debug!(error = %self, "Ads error");
            }
        }
    }
}

impl IntoResponse for AdsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AdValidationError> for AdsError {
    fn from(err: AdValidationError) -> Self {
        AdsError::Validation(err.to_string())
    }
}

impl From<QueryError> for AdsError {
    fn from(err: QueryError) -> Self {
        AdsError::Validation(err.to_string())
    }
}

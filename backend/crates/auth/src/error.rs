//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind, store::StoreError};
use platform::token::TokenError;
use thiserror::Error;

use crate::domain::value_object::login::LoginError;
use crate::domain::value_object::user_password::PasswordPolicyError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed validation; the message is the reason
    #[error("{0}")]
    Validation(String),

    /// Unknown login or wrong password
    #[error("invalid login or password")]
    InvalidCredentials,

    /// Login is already registered
    #[error("user with this login already exists")]
    UserExists,

    /// Token subject no longer resolves to a user
    #[error("user not found")]
    UserNotFound,

    /// Token failed signature, algorithm, expiry or subject checks
    #[error("invalid token: {0}")]
    InvalidToken(#[source] TokenError),

    /// Request carries no usable bearer credential
    #[error("unauthorized")]
    Unauthenticated,

    /// Store failure not mapped to a domain outcome
    #[error("Store error: {0}")]
    Store(#[source] StoreError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::InvalidToken(_)
            | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::UserExists => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Store(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::InvalidToken(_)
            | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::UserExists => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Store(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Token and server-side failures are rendered with a generic message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::InvalidToken(_) | AuthError::Unauthenticated => {
                AppError::unauthorized("unauthorized")
                    .with_action("Send a valid token as 'Authorization: Bearer <token>'")
            }
            AuthError::Store(_) | AuthError::Internal(_) => {
                AppError::internal("internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::Store(e) => {
                tracing::error!(error = %e, "Auth store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken(e) => {
                tracing::debug!(reason = %e, "Bearer token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<LoginError> for AuthError {
    fn from(err: LoginError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

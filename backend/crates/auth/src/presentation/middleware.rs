//! Auth Middleware
//!
//! Bearer-token middleware for routes owned by other crates.
//!
//! Both variants expect `Authorization: Bearer <token>` and store the
//! resolved [`CurrentUser`] in request extensions. Install them with
//! `axum::middleware::from_fn_with_state`.

use axum::extract::{FromRequestParts, OptionalFromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use std::convert::Infallible;
use std::sync::Arc;

use crate::application::VerifyTokenUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Authenticated caller stored in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
}

/// Middleware that rejects the request with 401 unless a valid token is sent
pub async fn require_auth<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user_id = match authenticate(&state, req.headers()).await {
        Ok(user_id) => user_id,
        Err(err) => {
            err.log();
            return Err(AuthError::Unauthenticated);
        }
    };

    req.extensions_mut().insert(CurrentUser { user_id });

    Ok(next.run(req).await)
}

/// Middleware that resolves the caller when possible and otherwise
/// continues anonymously
pub async fn optional_auth<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    if req.headers().contains_key(header::AUTHORIZATION) {
        match authenticate(&state, req.headers()).await {
            Ok(user_id) => {
                req.extensions_mut().insert(CurrentUser { user_id });
            }
            Err(err) => err.log(),
        }
    }

    next.run(req).await
}

async fn authenticate<R>(state: &AuthMiddlewareState<R>, headers: &HeaderMap) -> AuthResult<UserId>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = bearer_token(headers).ok_or(AuthError::Unauthenticated)?;

    VerifyTokenUseCase::new(state.repo.clone(), state.config.clone())
        .execute(token)
        .await
}

/// Extract `<token>` from `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if scheme != "Bearer" || token.is_empty() || token.contains(' ') {
        return None;
    }

    Some(token)
}

// ============================================================================
// Extractors
// ============================================================================

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or(AuthError::Unauthenticated)
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<CurrentUser>().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_rejects_malformed() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("abc.def.ghi")), None);
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("bearer abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer a b")), None);
    }
}

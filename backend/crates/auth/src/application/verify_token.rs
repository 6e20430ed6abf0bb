//! Verify Token Use Case
//!
//! Resolves a bearer token to the user it was issued for.

use std::sync::Arc;

use platform::token::TokenError;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Verify token use case
pub struct VerifyTokenUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> VerifyTokenUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Verify the token and confirm its subject still exists
    pub async fn execute(&self, token: &str) -> AuthResult<UserId> {
        let claims = self
            .config
            .token_signer()
            .verify(token)
            .map_err(AuthError::InvalidToken)?;

        let user_id = claims
            .sub
            .parse::<UserId>()
            .ok()
            .filter(UserId::is_set)
            .ok_or_else(|| {
                AuthError::InvalidToken(TokenError::Malformed(
                    "subject is not a user id".to_string(),
                ))
            })?;

        match self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(AuthError::Store)?
        {
            Some(user) => Ok(user.id),
            None => Err(AuthError::UserNotFound),
        }
    }
}

//! Register Use Case
//!
//! Creates a new user account and signs the first token.

use std::fmt;
use std::sync::Arc;

use kernel::error::store::StoreError;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    login::Login,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub login: String,
    pub password: String,
}

/// Register output
pub struct RegisterOutput {
    pub token: String,
    pub user: User,
}

impl fmt::Debug for RegisterOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterOutput")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let login = Login::new(&input.login)?;
        let raw_password = RawPassword::new(input.password)?;

        let password_hash = UserPassword::from_raw(&raw_password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = self
            .user_repo
            .create(&NewUser {
                login,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation => AuthError::UserExists,
                other => AuthError::Store(other),
            })?;

        let token = self
            .config
            .token_signer()
            .issue(&user.id.to_string())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, login = %user.login, "User registered");

        Ok(RegisterOutput { token, user })
    }
}

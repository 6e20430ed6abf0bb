//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{UserId, login::Login, user_password::UserPassword};

/// Persisted user
///
/// The password hash never leaves the auth crate's response DTOs.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub id: UserId,
    /// Unique login
    pub login: Login,
    /// Argon2id hash
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

/// User to be inserted; the store assigns `id` and `created_at`
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: Login,
    pub password_hash: UserPassword,
}

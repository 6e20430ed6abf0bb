//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::error::store::StoreResult;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::{UserId, login::Login};

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user; a taken login yields `StoreError::UniqueViolation`
    async fn create(&self, user: &NewUser) -> StoreResult<User>;

    /// Find user by login (exact match)
    async fn find_by_login(&self, login: &Login) -> StoreResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> StoreResult<Option<User>>;
}

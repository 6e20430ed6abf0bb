//! Value Object Module

pub mod login;
pub mod user_password;

pub use kernel::id::UserId;

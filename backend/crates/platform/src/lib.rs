//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, PHC string format)
//! - Signed, time-bound bearer tokens (HMAC-SHA256)

pub mod password;
pub mod token;

//! Ads (Classified Ads) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Ad entity, listing query validation, repository traits
//! - `application/` - Use cases (create, list, get)
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Rules
//! - Only authenticated users may create ads; the owner is the caller
//! - The author's login is copied onto the ad at creation
//! - Sort keys are whitelisted; no caller text reaches SQL
//! - `is_owner` is computed per response from the caller's identity

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{AdsError, AdsResult};
pub use infra::postgres::PgAdRepository;
pub use presentation::router::ads_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;

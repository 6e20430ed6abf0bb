//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod create_ad;
pub mod get_ad;
pub mod list_ads;

pub use create_ad::{CreateAdInput, CreateAdUseCase};
pub use get_ad::GetAdUseCase;
pub use list_ads::ListAdsUseCase;

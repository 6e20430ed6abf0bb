//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Ad, NewAd)
//! - Domain value objects (SortBy, SortOrder, ListQuery)
//! - Domain services (ad field rules, listing query validation)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

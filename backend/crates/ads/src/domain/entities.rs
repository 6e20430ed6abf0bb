//! Domain Entities
//!
//! Core business objects for the ads domain.

use chrono::{DateTime, Utc};
use kernel::id::{AdId, UserId};

/// Persisted classified ad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ad {
    pub id: AdId,
    /// Owner
    pub user_id: UserId,
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
    /// Smallest currency unit, never negative
    pub price: i64,
    /// Owner's login, copied at creation time
    pub author_login: String,
    pub created_at: DateTime<Utc>,
}

impl Ad {
    /// Whether `viewer` owns this ad (false for anonymous callers)
    pub fn is_owned_by(&self, viewer: Option<UserId>) -> bool {
        viewer.is_some_and(|id| id.is_set() && id == self.user_id)
    }
}

/// Ad to be inserted; the store assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAd {
    pub user_id: UserId,
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
    pub price: i64,
    pub author_login: String,
}
